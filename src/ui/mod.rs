use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
pub const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive prompt flow, treating Ctrl+C or Escape as a clean exit.
///
/// A newline is printed to tidy the terminal and `Ok(())` is returned instead
/// of the cancellation error.
pub fn handle_prompt_cancellation<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match f() {
        Ok(()) => Ok(()),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_is_swallowed() {
        assert!(handle_prompt_cancellation(|| Err(InquireError::OperationCanceled.into())).is_ok());
        assert!(
            handle_prompt_cancellation(|| Err(InquireError::OperationInterrupted.into())).is_ok()
        );
    }

    #[test]
    fn test_other_errors_propagate() {
        let result = handle_prompt_cancellation(|| Err(anyhow::anyhow!("config is broken")));
        let Err(err) = result else {
            panic!("expected an error");
        };
        assert!(err.to_string().contains("config is broken"));
    }

    #[test]
    fn test_is_prompt_cancelled() {
        assert!(is_prompt_cancelled(&InquireError::OperationCanceled));
        assert!(is_prompt_cancelled(&InquireError::OperationInterrupted));
        assert!(!is_prompt_cancelled(&InquireError::Custom("x".into())));
    }
}
