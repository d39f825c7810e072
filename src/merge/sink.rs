//! Output policies for the merge processor.

use crate::candidate::MergeCandidate;
use crate::diagram::PersistencePair;
use crate::forest::Forest;
use crate::image::GridView;
use crate::util::reserve::try_push;
use crate::util::PixHomResult;

/// A merge applied by the processor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeEvent {
    /// Root that keeps its identity.
    pub survivor: usize,
    /// Root that was attached below the survivor.
    pub loser: usize,
    /// Pixel on the surviving side that the loser now points at.
    pub attach: usize,
    /// Candidate that triggered the merge.
    pub candidate: MergeCandidate,
}

/// Receives every merge after the loser has been relinked.
pub trait MergeSink {
    fn on_merge(
        &mut self,
        event: &MergeEvent,
        grid: GridView<'_>,
        forest: &mut Forest,
    ) -> PixHomResult<()>;
}

/// Records `value[survivor] - value[loser]` at the loser.
#[derive(Debug, Default)]
pub struct ForestSink;

impl MergeSink for ForestSink {
    fn on_merge(
        &mut self,
        event: &MergeEvent,
        grid: GridView<'_>,
        forest: &mut Forest,
    ) -> PixHomResult<()> {
        let delta = grid.value(event.survivor) - grid.value(event.loser);
        forest.set_weight(event.loser, delta);
        Ok(())
    }
}

/// Collects (death, birth) pairs, dropping zero-length bars.
#[derive(Debug, Default)]
pub struct DiagramSink {
    pairs: Vec<PersistencePair>,
}

impl DiagramSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_pairs(self) -> Vec<PersistencePair> {
        self.pairs
    }
}

impl MergeSink for DiagramSink {
    fn on_merge(
        &mut self,
        event: &MergeEvent,
        grid: GridView<'_>,
        _forest: &mut Forest,
    ) -> PixHomResult<()> {
        let death = grid.value(event.loser);
        let birth = grid.value(event.candidate.u_point);
        if (death - birth).abs() > 0.0 {
            try_push(
                &mut self.pairs,
                PersistencePair { death, birth },
                "persistence diagram",
            )?;
        }
        Ok(())
    }
}
