use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

use super::AlertKind;

/// Last notification time per alert kind. Every kind starts at the Unix epoch, meaning
/// "never notified".
#[derive(Debug, Clone)]
pub struct ThrottleState {
    last_sent: HashMap<AlertKind, DateTime<Utc>>,
}

impl Default for ThrottleState {
    fn default() -> Self {
        Self {
            last_sent: AlertKind::ALL
                .into_iter()
                .map(|kind| (kind, DateTime::<Utc>::UNIX_EPOCH))
                .collect(),
        }
    }
}

impl ThrottleState {
    pub fn last_sent(&self, kind: AlertKind) -> DateTime<Utc> {
        self.last_sent
            .get(&kind)
            .copied()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// True once `now` is strictly past the last notification plus the cooldown.
    pub fn cooldown_elapsed(
        &self,
        kind: AlertKind,
        now: DateTime<Utc>,
        cooldown_secs: u64,
    ) -> bool {
        let cooldown = i64::try_from(cooldown_secs)
            .ok()
            .and_then(TimeDelta::try_seconds);
        let Some(reopens_at) =
            cooldown.and_then(|cooldown| self.last_sent(kind).checked_add_signed(cooldown))
        else {
            return false;
        };

        now > reopens_at
    }

    pub(crate) fn mark_sent(&mut self, kind: AlertKind, now: DateTime<Utc>) {
        self.last_sent.insert(kind, now);
    }
}
