use tracing::debug;

use crate::state::step_fields::{StepFieldMap, StepKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Active,
    Pending,
}

/// Position of a form within its ordered steps.
///
/// The index only moves one step at a time through [`Flow::next_step`] and
/// [`Flow::prev_step`], or gets remapped when the field map is replaced.
/// Neither path can leave it outside `0..len` while steps exist.
#[derive(Debug, Clone, Default)]
pub struct Flow {
    step_fields: StepFieldMap,
    current: usize,
}

impl Flow {
    pub fn new(step_fields: StepFieldMap) -> Self {
        Self {
            step_fields,
            current: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_key(&self) -> Option<&StepKey> {
        self.step_fields.key_at(self.current)
    }

    pub fn len(&self) -> usize {
        self.step_fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.step_fields.is_empty()
    }

    pub fn steps(&self) -> Vec<StepKey> {
        self.step_fields.keys().cloned().collect()
    }

    pub fn step_fields(&self) -> &StepFieldMap {
        &self.step_fields
    }

    pub fn fields_for(&self, key: &str) -> Option<&[String]> {
        self.step_fields.fields(key)
    }

    /// Fields gating the current step. `None` when the step registered none.
    pub fn current_fields(&self) -> Option<&[String]> {
        let key = self.current_key()?;
        self.step_fields.fields(key.as_str())
    }

    pub fn is_first(&self) -> bool {
        !self.is_empty() && self.current == 0
    }

    pub fn is_last(&self) -> bool {
        !self.is_empty() && self.current + 1 == self.len()
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.len()
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    pub fn next_step(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn prev_step(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        if index < self.current {
            StepStatus::Done
        } else if index == self.current && !self.is_empty() {
            StepStatus::Active
        } else {
            StepStatus::Pending
        }
    }

    pub fn current_status(&self) -> StepStatus {
        self.status_at(self.current)
    }

    /// Replaces the field map.
    ///
    /// If the current step survives, the index follows it to its new
    /// position. Otherwise the old index is clamped into the new range.
    pub fn set_step_fields(&mut self, step_fields: StepFieldMap) {
        let previous_key = self.current_key().cloned();
        let previous_index = self.current;
        self.step_fields = step_fields;
        self.remap(previous_key, previous_index);
    }

    pub fn update_step_fields(&mut self, update: impl FnOnce(&mut StepFieldMap)) {
        let previous_key = self.current_key().cloned();
        let previous_index = self.current;
        update(&mut self.step_fields);
        self.remap(previous_key, previous_index);
    }

    fn remap(&mut self, previous_key: Option<StepKey>, previous_index: usize) {
        let followed = previous_key
            .as_ref()
            .and_then(|key| self.step_fields.position(key.as_str()));

        self.current = match followed {
            Some(index) => index,
            None => previous_index.min(self.len().saturating_sub(1)),
        };

        if self.current != previous_index {
            debug!(
                from = previous_index,
                to = self.current,
                step = ?previous_key,
                "step index remapped after field map change"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Flow, StepStatus};
    use crate::state::step_fields::StepFieldMap;

    fn three_steps() -> Flow {
        Flow::new(
            StepFieldMap::new()
                .with_step("a", ["name"])
                .with_step("b", Vec::<String>::new())
                .with_step("c", ["email"]),
        )
    }

    #[test]
    fn starts_on_first_step() {
        let flow = three_steps();
        assert_eq!(flow.current_index(), 0);
        assert_eq!(flow.current_key().map(|key| key.as_str()), Some("a"));
        assert!(flow.is_first());
        assert!(!flow.is_last());
    }

    #[test]
    fn next_is_idempotent_at_last_step() {
        let mut flow = three_steps();
        assert!(flow.next_step());
        assert!(flow.next_step());
        assert!(!flow.next_step());
        assert_eq!(flow.current_index(), 2);
        assert!(flow.is_last());
    }

    #[test]
    fn prev_is_idempotent_at_first_step() {
        let mut flow = three_steps();
        assert!(!flow.prev_step());
        assert_eq!(flow.current_index(), 0);
    }

    #[test]
    fn index_stays_in_range_for_any_sequence() {
        let mut flow = three_steps();
        // Deterministic pseudo-random walk.
        let mut seed: u32 = 0x9e37_79b9;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 2 == 0 {
                flow.next_step();
            } else {
                flow.prev_step();
            }
            assert!(flow.current_index() < flow.len());
        }
    }

    #[test]
    fn index_stays_in_range_while_steps_change() {
        let mut flow = three_steps();
        let mut seed: u32 = 0x2545_f491;
        let mut added = 0usize;
        for _ in 0..1000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let before = flow.current_key().cloned();
            match seed % 5 {
                0 => {
                    flow.next_step();
                }
                1 => {
                    flow.prev_step();
                }
                2 => {
                    let victim = (seed as usize / 5) % flow.len().max(1);
                    let removed = flow.step_fields().key_at(victim).cloned();
                    flow.update_step_fields(|map| {
                        if let Some(key) = &removed {
                            map.remove(key.as_str());
                        }
                    });
                    if before.is_some() && before != removed {
                        assert_eq!(flow.current_key(), before.as_ref());
                    }
                }
                _ => {
                    added += 1;
                    let key = format!("s{added}");
                    flow.update_step_fields(|map| {
                        map.insert(key, Vec::<String>::new());
                    });
                    if before.is_some() {
                        assert_eq!(flow.current_key(), before.as_ref());
                    }
                }
            }

            if flow.is_empty() {
                assert_eq!(flow.current_index(), 0);
                assert!(flow.current_key().is_none());
            } else {
                assert!(flow.current_index() < flow.len());
                assert!(flow.current_key().is_some());
            }
        }
    }

    #[test]
    fn empty_flow_never_moves() {
        let mut flow = Flow::new(StepFieldMap::new());
        assert!(!flow.next_step());
        assert!(!flow.prev_step());
        assert_eq!(flow.current_index(), 0);
        assert!(flow.current_key().is_none());
        assert!(!flow.is_first());
        assert!(!flow.is_last());
    }

    #[test]
    fn statuses_follow_index() {
        let mut flow = three_steps();
        flow.next_step();
        assert_eq!(flow.status_at(0), StepStatus::Done);
        assert_eq!(flow.status_at(1), StepStatus::Active);
        assert_eq!(flow.status_at(2), StepStatus::Pending);
    }

    #[test]
    fn current_fields_resolves_registered_list() {
        let mut flow = three_steps();
        assert_eq!(flow.current_fields(), Some(&["name".to_string()][..]));
        flow.next_step();
        assert_eq!(flow.current_fields(), Some(&[][..]));
    }

    #[test]
    fn remap_follows_surviving_key() {
        let mut flow = three_steps();
        flow.next_step();
        flow.set_step_fields(
            StepFieldMap::new()
                .with_step("intro", Vec::<String>::new())
                .with_step("a", ["name"])
                .with_step("c", ["email"])
                .with_step("b", Vec::<String>::new()),
        );
        assert_eq!(flow.current_key().map(|key| key.as_str()), Some("b"));
        assert_eq!(flow.current_index(), 3);
    }

    #[test]
    fn remap_clamps_when_current_step_disappears() {
        let mut flow = three_steps();
        flow.next_step();
        flow.next_step();
        flow.update_step_fields(|map| {
            map.remove("c");
        });
        assert_eq!(flow.current_index(), 1);
        assert_eq!(flow.current_key().map(|key| key.as_str()), Some("b"));

        flow.set_step_fields(StepFieldMap::new());
        assert_eq!(flow.current_index(), 0);
        assert!(flow.current_key().is_none());
    }

    #[test]
    fn adding_fields_to_current_step_keeps_position() {
        let mut flow = three_steps();
        flow.next_step();
        flow.update_step_fields(|map| {
            if let Some(fields) = map.fields_mut("b") {
                fields.push("nickname".to_string());
            }
        });
        assert_eq!(flow.current_index(), 1);
        assert_eq!(flow.current_fields(), Some(&["nickname".to_string()][..]));
    }
}
