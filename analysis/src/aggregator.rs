use common::MatchResult;

use crate::events::DemoEvent;
use crate::recording::DemoHeader;
use crate::tracker::RoundTracker;
use crate::{ParseError, ParserConfig, SourceError};

/// Drives a single match from its first event to the final [`MatchResult`].
///
/// Not meant to be shared, every match gets its own aggregator.
#[derive(Debug)]
pub struct MatchAggregator {
    config: ParserConfig,
    header: DemoHeader,
    tracker: RoundTracker,
}

impl MatchAggregator {
    pub fn new(config: ParserConfig, header: DemoHeader) -> Self {
        Self {
            config,
            header,
            tracker: RoundTracker::new(),
        }
    }

    pub fn run<I>(config: ParserConfig, header: DemoHeader, events: I) -> Result<MatchResult, ParseError>
    where
        I: IntoIterator<Item = Result<DemoEvent, SourceError>>,
    {
        let mut aggregator = Self::new(config, header);
        for event in events {
            aggregator.feed(event?);
        }

        aggregator.finish()
    }

    pub fn feed(&mut self, event: DemoEvent) {
        self.tracker.handle(event);
    }

    pub fn tracker(&self) -> &RoundTracker {
        &self.tracker
    }

    pub fn is_over(&self) -> bool {
        self.tracker.is_over()
    }

    pub fn finish(self) -> Result<MatchResult, ParseError> {
        if !self.tracker.is_over() {
            tracing::warn!(
                map = %self.header.map,
                rounds = self.tracker.rounds().len(),
                "Recording ended before the match did, it might be incomplete"
            );
            return Err(ParseError::IncompleteStream {
                rounds: self.tracker.rounds().len(),
            });
        }

        let duration = self.tracker.duration();
        let (rounds, standings) = self.tracker.into_parts();

        let result = MatchResult {
            parser_version: self.config.parser_version,
            map: self.header.map,
            start_time: self.header.start_time,
            duration,
            teams: standings.to_teams(),
            rounds: rounds.iter().map(|r| r.to_result()).collect(),
        };

        let (first, second) = result.score();
        tracing::info!(map = %result.map, "Match result was {}-{}", first, second);

        Ok(result)
    }
}
