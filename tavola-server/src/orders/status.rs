//! Order state machine
//!
//! Closed transition table: the kitchen progression is strictly
//! sequential, while the two terminal states are reachable from any
//! non-terminal state (auto-completion and cancellation both need that).
//! Anything outside the table is a validation error; the status field
//! never accepts free-form values.

use shared::models::{OrderItemStatus, OrderStatus};

use crate::utils::AppError;

/// Allowed predecessor check for an order status transition.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    if from.is_terminal() {
        return false;
    }
    match to {
        Confirmed => from == Pending,
        Cooking => from == Confirmed,
        Ready => from == Cooking,
        Served => from == Ready,
        Completed | Cancelled => true,
        Pending => false,
    }
}

/// Validate a transition, surfacing the rejected pair.
pub fn check_transition(from: OrderStatus, to: OrderStatus) -> Result<(), AppError> {
    if from == to {
        return Err(AppError::validation(format!(
            "Order is already {}",
            from.as_str()
        )));
    }
    if !can_transition(from, to) {
        return Err(AppError::validation(format!(
            "Invalid order transition: {} -> {}",
            from.as_str(),
            to.as_str()
        )));
    }
    Ok(())
}

/// Item progression: `pending -> cooking -> ready -> served`, with
/// `completed` accepted as a synonym for fully done at any point after
/// cooking starts. Done items stay done.
pub fn can_transition_item(from: OrderItemStatus, to: OrderItemStatus) -> bool {
    use OrderItemStatus::*;
    if from.is_done() {
        return false;
    }
    match to {
        Cooking => from == Pending,
        Ready => from == Cooking,
        Served | Completed => true,
        Pending => false,
    }
}

pub fn check_item_transition(from: OrderItemStatus, to: OrderItemStatus) -> Result<(), AppError> {
    if !can_transition_item(from, to) {
        return Err(AppError::validation(format!(
            "Invalid item transition: {from:?} -> {to:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn kitchen_progression_is_sequential() {
        assert!(can_transition(Pending, Confirmed));
        assert!(can_transition(Confirmed, Cooking));
        assert!(can_transition(Cooking, Ready));
        assert!(can_transition(Ready, Served));
        // No skipping forward
        assert!(!can_transition(Pending, Cooking));
        assert!(!can_transition(Confirmed, Ready));
        // No going back
        assert!(!can_transition(Cooking, Confirmed));
        assert!(!can_transition(Served, Ready));
    }

    #[test]
    fn terminals_reachable_from_any_non_terminal() {
        for from in [Pending, Confirmed, Cooking, Ready, Served] {
            assert!(can_transition(from, Completed), "{from:?} -> completed");
            assert!(can_transition(from, Cancelled), "{from:?} -> cancelled");
        }
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for to in [Pending, Confirmed, Cooking, Ready, Served, Completed, Cancelled] {
            assert!(!can_transition(Completed, to));
            assert!(!can_transition(Cancelled, to));
        }
    }

    #[test]
    fn item_completed_is_a_done_synonym() {
        use OrderItemStatus as I;
        assert!(can_transition_item(I::Pending, I::Cooking));
        assert!(can_transition_item(I::Cooking, I::Ready));
        assert!(can_transition_item(I::Ready, I::Served));
        assert!(can_transition_item(I::Ready, I::Completed));
        assert!(can_transition_item(I::Pending, I::Served));
        assert!(!can_transition_item(I::Served, I::Cooking));
        assert!(!can_transition_item(I::Completed, I::Served));
    }
}
