use thiserror::Error;

/// Candy machine error code for an exhausted supply.
pub const CODE_SOLD_OUT: u32 = 311;
/// Candy machine error code for a mint before the go-live date.
pub const CODE_NOT_STARTED: u32 = 312;

const SOLD_OUT_MARKER: &str = "0x137";
const INSUFFICIENT_FUNDS_MARKER: &str = "0x135";

/// Failure while fetching machine state. Logged, never shown to the user.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("candy machine bridge rejected the request: {0}")]
    Rpc(String),
    #[error("could not decode candy machine state: {0}")]
    Decode(String),
}

/// Raw shape of a rejected mint or confirmation call.
///
/// `code` and `msg` are set by program errors, `message` by transport and
/// simulation errors. A rejection with none of them is a confirmation
/// timeout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MintError {
    pub code: Option<u32>,
    pub msg: Option<String>,
    pub message: Option<String>,
}

impl MintError {
    pub fn timeout() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn program(code: u32, msg: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            msg: Some(msg.into()),
            message: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MintFailure {
    /// `reload` is set when the program itself reported the sold-out code;
    /// the page is reloaded so the fresh supply is shown.
    SoldOut { reload: bool },
    NotStarted,
    InsufficientFunds,
    Timeout,
    /// Program error with an unrecognised code; its message is shown as is.
    Program(String),
    Generic,
}

impl MintFailure {
    pub fn message(&self) -> &str {
        match self {
            MintFailure::SoldOut { .. } => "SOLD OUT!",
            MintFailure::NotStarted => "Minting period hasn't started yet.",
            MintFailure::InsufficientFunds => {
                "Insufficient funds to mint. Please fund your wallet."
            }
            MintFailure::Timeout => "Transaction Timeout! Please try again.",
            MintFailure::Program(msg) => msg.as_str(),
            MintFailure::Generic => "Minting failed! Please try again!",
        }
    }
}

/// Reads a numeric rejection code. Only non-negative integers are codes.
pub fn error_code(raw: f64) -> Option<u32> {
    if raw.is_finite() && raw.fract() == 0.0 && raw >= 0.0 && raw <= u32::MAX as f64 {
        Some(raw as u32)
    } else {
        None
    }
}

/// Classifies a rejected mint. First match wins:
///
/// 1. code 311: sold out, reload the page
/// 2. `message` contains `0x137`: sold out, whatever the other fields hold
/// 3. code 312: minting not started
/// 4. any other program error (`msg` set): its own message
/// 5. no `message`: confirmation timed out
/// 6. `message` contains `0x135`: insufficient funds
/// 7. anything else: generic retry message
pub fn classify(error: &MintError) -> MintFailure {
    if error.code == Some(CODE_SOLD_OUT) {
        return MintFailure::SoldOut { reload: true };
    }
    if error
        .message
        .as_deref()
        .is_some_and(|m| m.contains(SOLD_OUT_MARKER))
    {
        return MintFailure::SoldOut { reload: false };
    }
    if error.code == Some(CODE_NOT_STARTED) {
        return MintFailure::NotStarted;
    }

    if let Some(msg) = &error.msg {
        return MintFailure::Program(msg.clone());
    }

    let Some(message) = &error.message else {
        return MintFailure::Timeout;
    };
    if message.contains(INSUFFICIENT_FUNDS_MARKER) {
        MintFailure::InsufficientFunds
    } else {
        MintFailure::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sold_out_code_reloads() {
        let failure = classify(&MintError::program(311, "Candy machine is empty!"));
        assert_eq!(failure, MintFailure::SoldOut { reload: true });
        assert_eq!(failure.message(), "SOLD OUT!");
    }

    #[test]
    fn not_started_code_does_not_reload() {
        let failure = classify(&MintError::program(312, "Candy machine is not live!"));
        assert_eq!(failure, MintFailure::NotStarted);
        assert_eq!(failure.message(), "Minting period hasn't started yet.");
    }

    #[test]
    fn sold_out_marker_wins_over_not_started_code() {
        let error = MintError {
            code: Some(312),
            msg: None,
            message: Some("custom program error: 0x137".into()),
        };
        let failure = classify(&error);
        assert_eq!(failure, MintFailure::SoldOut { reload: false });
        assert_eq!(failure.message(), "SOLD OUT!");
    }

    #[test]
    fn sold_out_marker_wins_over_program_message() {
        let error = MintError {
            code: Some(300),
            msg: Some("Account does not have correct owner!".into()),
            message: Some("Transaction simulation failed: custom program error: 0x137".into()),
        };
        assert_eq!(classify(&error).message(), "SOLD OUT!");
    }

    #[test]
    fn sold_out_code_with_marker_still_reloads() {
        let error = MintError {
            code: Some(311),
            msg: Some("Candy machine is empty!".into()),
            message: Some("custom program error: 0x137".into()),
        };
        assert_eq!(classify(&error), MintFailure::SoldOut { reload: true });
    }

    #[test]
    fn not_started_code_wins_over_other_messages() {
        let error = MintError {
            code: Some(312),
            msg: Some("Candy machine is not live!".into()),
            message: Some("custom program error: 0x135".into()),
        };
        assert_eq!(classify(&error), MintFailure::NotStarted);
    }

    #[test]
    fn only_whole_non_negative_numbers_are_codes() {
        assert_eq!(error_code(311.0), Some(311));
        assert_eq!(error_code(0.0), Some(0));
        assert_eq!(error_code(311.9), None);
        assert_eq!(error_code(-1.0), None);
        assert_eq!(error_code(f64::NAN), None);
        assert_eq!(error_code(f64::INFINITY), None);
        assert_eq!(error_code(1e12), None);
    }

    #[test]
    fn unknown_program_error_passes_its_message_through() {
        let failure = classify(&MintError::program(300, "Account does not have correct owner!"));
        assert_eq!(failure.message(), "Account does not have correct owner!");
    }

    #[test]
    fn missing_message_is_a_timeout() {
        assert_eq!(classify(&MintError::timeout()), MintFailure::Timeout);
    }

    #[test]
    fn sold_out_marker_anywhere_in_message() {
        for message in [
            "0x137",
            "Transaction simulation failed: custom program error: 0x137",
            "failed (0x137) and also 0x135",
        ] {
            let failure = classify(&MintError::with_message(message));
            assert_eq!(failure, MintFailure::SoldOut { reload: false });
            assert_eq!(failure.message(), "SOLD OUT!");
        }
    }

    #[test]
    fn insufficient_funds_marker() {
        let failure = classify(&MintError::with_message("custom program error: 0x135"));
        assert_eq!(failure, MintFailure::InsufficientFunds);
    }

    #[test]
    fn unrecognised_message_falls_back_to_retry() {
        let failure = classify(&MintError::with_message("User rejected the request."));
        assert_eq!(failure, MintFailure::Generic);
        assert_eq!(failure.message(), "Minting failed! Please try again!");
    }
}
