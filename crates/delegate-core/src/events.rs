// Try-policy failure notifications
//
// A failed sub-call under the try policy is reported as a
// `TryExecuteUnsuccessful(index, result)` log emitted by the account.

use alloy_primitives::{Address, Bytes, Log, LogData, U256};
use alloy_sol_types::SolEvent;

use crate::abi::TryExecuteUnsuccessful;
use crate::host::Frame;

/// Recovered failure of the call at `index` in the dispatched sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub index: usize,
    pub return_data: Bytes,
}

impl Notification {
    pub fn new(index: usize, return_data: impl Into<Bytes>) -> Self {
        Self { index, return_data: return_data.into() }
    }

    pub fn to_log_data(&self) -> LogData {
        TryExecuteUnsuccessful {
            batchExecutionIndex: U256::from(self.index),
            result: self.return_data.clone(),
        }
        .encode_log_data()
    }

    /// Decode a notification, or `None` for any other log
    pub fn from_log(log: &Log) -> Option<Self> {
        if log.data.topics().first() != Some(&TryExecuteUnsuccessful::SIGNATURE_HASH) {
            return None;
        }
        let event = TryExecuteUnsuccessful::decode_log_data(&log.data, true).ok()?;
        let index = usize::try_from(event.batchExecutionIndex).ok()?;
        Some(Self { index, return_data: event.result })
    }
}

/// Emit a notification from the account the frame runs as
pub fn emit(frame: &mut Frame<'_>, notification: &Notification) {
    frame.emit(notification.to_log_data());
}

/// Every notification emitted by `account` in `logs`, in emission order.
///
/// Logs from other accounts are skipped, including nested accounts that ran
/// in the same transaction.
pub fn notifications(logs: &[Log], account: Address) -> Vec<Notification> {
    logs.iter()
        .filter(|log| log.address == account)
        .filter_map(Notification::from_log)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_carries_index_and_data() {
        let notification = Notification::new(3, vec![0xca, 0xfe]);
        let log = Log { address: Address::ZERO, data: notification.to_log_data() };

        assert_eq!(log.data.topics().len(), 1);
        assert_eq!(Notification::from_log(&log), Some(notification));
    }

    #[test]
    fn test_unrelated_logs_are_skipped() {
        let other = Log {
            address: Address::ZERO,
            data: LogData::new_unchecked(Vec::new(), Bytes::from(vec![1, 2, 3])),
        };
        let failure = Log { address: Address::ZERO, data: Notification::new(0, Bytes::new()).to_log_data() };

        assert_eq!(notifications(&[other, failure], Address::ZERO), vec![Notification::new(0, Bytes::new())]);
    }

    #[test]
    fn test_notifications_are_scoped_to_one_account() {
        let account = Address::with_last_byte(0xac);
        let nested = Address::with_last_byte(0xbc);
        let logs = vec![
            Log { address: nested, data: Notification::new(0, vec![0x01]).to_log_data() },
            Log { address: account, data: Notification::new(2, vec![0x02]).to_log_data() },
        ];

        assert_eq!(notifications(&logs, account), vec![Notification::new(2, vec![0x02])]);
        assert_eq!(notifications(&logs, nested), vec![Notification::new(0, vec![0x01])]);
    }
}
