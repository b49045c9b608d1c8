use crate::ball::BallId;
use crate::error::{Result, RigError};

/// Ordered set of balls the player may aim at, with a cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetCycle {
    selectable: Vec<BallId>,
    current: Option<usize>,
}

impl TargetCycle {
    /// The first id, if any, starts out selected.
    pub fn new(selectable: impl IntoIterator<Item = BallId>) -> Self {
        let mut selectable: Vec<BallId> = selectable.into_iter().collect();
        let mut seen = Vec::with_capacity(selectable.len());
        selectable.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
        let current = if selectable.is_empty() { None } else { Some(0) };
        Self { selectable, current }
    }

    pub fn selectable(&self) -> &[BallId] {
        &self.selectable
    }

    pub fn is_empty(&self) -> bool {
        self.selectable.is_empty()
    }

    pub fn current(&self) -> Option<BallId> {
        self.current.map(|index| self.selectable[index])
    }

    pub fn contains(&self, id: BallId) -> bool {
        self.selectable.contains(&id)
    }

    /// Advances to the next selectable ball, wrapping at the end.
    pub fn next(&mut self) -> Option<BallId> {
        if self.selectable.is_empty() {
            return None;
        }
        let index = match self.current {
            Some(index) => (index + 1) % self.selectable.len(),
            None => 0,
        };
        self.current = Some(index);
        self.current()
    }

    pub fn select(&mut self, id: BallId) -> Result<()> {
        match self.selectable.iter().position(|&candidate| candidate == id) {
            Some(index) => {
                self.current = Some(index);
                Ok(())
            }
            None => {
                log::warn!("ball {id} is not selectable");
                Err(RigError::UnknownTarget(id))
            }
        }
    }

    /// Replaces the selectable set, keeping the current ball when it survives.
    pub fn set_selectable(&mut self, selectable: impl IntoIterator<Item = BallId>) {
        let previous = self.current();
        *self = Self::new(selectable);
        if let Some(id) = previous {
            if self.contains(id) {
                let _ = self.select(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_around() {
        let mut cycle = TargetCycle::new([4, 7, 9]);
        assert_eq!(cycle.current(), Some(4));
        assert_eq!(cycle.next(), Some(7));
        assert_eq!(cycle.next(), Some(9));
        assert_eq!(cycle.next(), Some(4));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut cycle = TargetCycle::new([1, 2]);
        assert_eq!(cycle.select(5), Err(RigError::UnknownTarget(5)));
        assert_eq!(cycle.current(), Some(1));
        assert!(cycle.select(2).is_ok());
        assert_eq!(cycle.current(), Some(2));
    }

    #[test]
    fn empty_and_replaced_sets() {
        let mut cycle = TargetCycle::new([]);
        assert_eq!(cycle.next(), None);

        let mut cycle = TargetCycle::new([3, 3, 8]);
        assert_eq!(cycle.selectable(), &[3, 8]);
        cycle.next();
        cycle.set_selectable([1, 8]);
        assert_eq!(cycle.current(), Some(8));
        cycle.set_selectable([1]);
        assert_eq!(cycle.current(), Some(1));
    }
}
