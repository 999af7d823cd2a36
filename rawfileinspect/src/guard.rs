use std::fmt::Debug;

use log::debug;

use crate::error::{AppError, SourceCondition};
use crate::source::RawSource;

/// Owns an opened [`RawSource`] for the length of one command and closes it
/// exactly once when dropped, whichever way the command ends.
pub struct SourceGuard {
    source: Box<dyn RawSource>,
}

impl Debug for SourceGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceGuard")
            .field("source", &self.source.file_name())
            .finish()
    }
}

impl Drop for SourceGuard {
    fn drop(&mut self) {
        debug!("Closing {}", self.source.file_name());
        self.source.close()
    }
}

impl SourceGuard {
    pub fn new(source: Box<dyn RawSource>) -> Self {
        Self { source }
    }

    /// Refuse a source that is closed, in an error state, or still being acquired
    pub fn check_state(&self) -> Result<(), AppError> {
        let condition = if !self.source.is_open() {
            SourceCondition::NotOpen
        } else if self.source.has_error() {
            SourceCondition::HasError
        } else if self.source.is_being_acquired() {
            SourceCondition::InAcquisition
        } else {
            return Ok(());
        };
        Err(AppError::SourceState {
            file: self.source.file_name().to_string(),
            condition,
            detail: self
                .source
                .status_message()
                .unwrap_or_else(|| "no further details".to_string()),
        })
    }

    pub fn source(&mut self) -> &mut dyn RawSource {
        self.source.as_mut()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::snapshot::Snapshot;
    use crate::testing::RecordingSource;

    #[test]
    fn test_closes_once_on_drop() {
        let (source, calls) = RecordingSource::new(Snapshot::default());
        {
            let guard = SourceGuard::new(Box::new(source));
            guard.check_state().unwrap();
        }
        assert_eq!(calls.borrow().closes, 1);
    }

    #[test]
    fn test_state_checks() {
        let snapshot = Snapshot {
            in_acquisition: true,
            ..Default::default()
        };
        let (source, calls) = RecordingSource::new(snapshot);
        let guard = SourceGuard::new(Box::new(source));
        match guard.check_state() {
            Err(AppError::SourceState { condition, .. }) => {
                assert_eq!(condition, SourceCondition::InAcquisition)
            }
            other => panic!("Expected a source state error, got {other:?}"),
        }
        drop(guard);
        assert_eq!(calls.borrow().closes, 1);

        let snapshot = Snapshot {
            error: Some("bad checksum".into()),
            in_acquisition: true,
            ..Default::default()
        };
        let (source, _calls) = RecordingSource::new(snapshot);
        let guard = SourceGuard::new(Box::new(source));
        let err = guard.check_state().unwrap_err();
        assert!(err.to_string().contains("bad checksum"));
    }

    #[test]
    fn test_not_open() {
        let (mut source, _calls) = RecordingSource::new(Snapshot::default());
        source.inner_mut().close();
        let guard = SourceGuard::new(Box::new(source));
        assert!(matches!(
            guard.check_state(),
            Err(AppError::SourceState {
                condition: SourceCondition::NotOpen,
                ..
            })
        ));
    }
}
