use tracing::info;

use crate::config::TransferConfig;
use crate::matching::{MatchResult, TrackMatcher};
use crate::playlist;
use crate::ports::{CreationError, DestinationCatalog, SourceCatalog, TrackDescriptor};
use crate::reader::{self, ReadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Idle,
    Indexing,
    Matching,
    Materializing,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedTrack {
    /// 1-based position in the source playlist
    pub ordinal: usize,
    pub descriptor: TrackDescriptor,
}

/// Outcome of matching. `resolved_ids.len() + unresolved.len() == total`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    /// Number of tracks read from the source playlist
    pub total: usize,
    pub resolved_ids: Vec<String>,
    pub unresolved: Vec<UnresolvedTrack>,
}

impl TransferReport {
    fn from_results(results: Vec<MatchResult>) -> Self {
        let mut report = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result {
                MatchResult::Matched { id } => report.resolved_ids.push(id),
                MatchResult::Unmatched {
                    descriptor,
                    ordinal,
                } => report.unresolved.push(UnresolvedTrack {
                    ordinal,
                    descriptor,
                }),
            }
        }
        report
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("no tracks were found in the destination catalog, playlist not created")]
    NoTracksResolved { report: TransferReport },
    #[error("failed to create playlist: {source}")]
    Creation {
        source: CreationError,
        report: TransferReport,
    },
}

impl TransferError {
    /// The matching report, for failures that happen after matching ran
    pub fn report(&self) -> Option<&TransferReport> {
        match self {
            Self::Read(_) => None,
            Self::NoTracksResolved { report } | Self::Creation { report, .. } => Some(report),
        }
    }
}

/// Drives one playlist transfer: read the source, match every track, then
/// create the destination playlist from whatever resolved.
pub struct Transfer<'a, S: ?Sized, D: ?Sized> {
    source: &'a S,
    destination: &'a D,
    config: TransferConfig,
    state: TransferState,
}

impl<'a, S, D> Transfer<'a, S, D>
where
    S: SourceCatalog + ?Sized,
    D: DestinationCatalog + ?Sized,
{
    pub fn new(source: &'a S, destination: &'a D, config: TransferConfig) -> Self {
        Self {
            source,
            destination,
            config,
            state: TransferState::Idle,
        }
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    fn transition(&mut self, next: TransferState) {
        info!(from = ?self.state, to = ?next, "transfer state changed");
        self.state = next;
    }

    fn fail(&mut self, err: TransferError) -> TransferError {
        self.transition(TransferState::Failed);
        err
    }

    pub async fn run(
        &mut self,
        playlist_id: &str,
        playlist_name: &str,
    ) -> Result<TransferReport, TransferError> {
        self.transition(TransferState::Indexing);
        let tracks = match reader::fetch_all(self.source, playlist_id).await {
            Ok(tracks) => tracks,
            Err(err) => return Err(self.fail(err.into())),
        };

        self.transition(TransferState::Matching);
        let results = TrackMatcher::new(self.destination)
            .resolve_all(&tracks, self.config.concurrency)
            .await;
        let report = TransferReport::from_results(results);
        info!(
            total = report.total,
            resolved = report.resolved_ids.len(),
            unresolved = report.unresolved.len(),
            "matching finished",
        );

        if report.resolved_ids.is_empty() {
            return Err(self.fail(TransferError::NoTracksResolved { report }));
        }

        self.transition(TransferState::Materializing);
        if let Err(source) =
            playlist::create_playlist(self.destination, playlist_name, &report.resolved_ids).await
        {
            return Err(self.fail(TransferError::Creation { source, report }));
        }

        self.transition(TransferState::Done);
        Ok(report)
    }
}
