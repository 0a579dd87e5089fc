use crate::models::game_state::{GameSummary, PlayerRef, SessionIdentity};
use crate::models::messages::ClientMessage;

/// What happened to a lobby row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterChange {
    Added(String),
    Updated(String),
    Removed(String),
    /// A predicted removal the server contradicted
    Restored(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LobbyRow {
    summary: GameSummary,
    /// Hidden by a predicted removal; keeps its slot until the server settles it.
    pending_removal: bool,
}

/// Lobby rows in the order the server announced them.
///
/// A row hidden by [`predict_removal`](Self::predict_removal) stays hidden
/// until the server confirms the removal or reports the game again, for as
/// long as the session lasts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LobbyRoster {
    rows: Vec<LobbyRow>,
}

impl LobbyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameSummary> {
        self.rows
            .iter()
            .filter(|row| !row.pending_removal)
            .map(|row| &row.summary)
    }

    pub fn get(&self, game_id: &str) -> Option<&GameSummary> {
        self.iter().find(|summary| summary.game_id == game_id)
    }

    pub fn is_pending_removal(&self, game_id: &str) -> bool {
        self.row(game_id).is_some_and(|row| row.pending_removal)
    }

    /// Insert a row, or replace the existing one in place.
    pub fn record_game_created(&mut self, summary: GameSummary) -> RosterChange {
        let game_id = summary.game_id.clone();
        match self.row_mut(&game_id) {
            Some(row) => {
                let was_hidden = row.pending_removal;
                row.summary = summary;
                row.pending_removal = false;
                if was_hidden {
                    RosterChange::Restored(game_id)
                } else {
                    RosterChange::Updated(game_id)
                }
            }
            None => {
                self.rows.push(LobbyRow {
                    summary,
                    pending_removal: false,
                });
                RosterChange::Added(game_id)
            }
        }
    }

    /// Drop a row the server removed. Unknown ids are ignored.
    ///
    /// A row already hidden by a predicted removal is confirmed silently.
    pub fn record_game_removed(&mut self, game_id: &str) -> Option<RosterChange> {
        let index = self
            .rows
            .iter()
            .position(|row| row.summary.game_id == game_id)?;
        let row = self.rows.remove(index);
        (!row.pending_removal).then(|| RosterChange::Removed(game_id.to_string()))
    }

    /// Hide a row ahead of the server's confirmation.
    pub fn predict_removal(&mut self, game_id: &str) -> Option<RosterChange> {
        let row = self.row_mut(game_id).filter(|row| !row.pending_removal)?;
        row.pending_removal = true;
        Some(RosterChange::Removed(game_id.to_string()))
    }

    /// Show a predicted removal again because the server still reports the game.
    pub fn reinstate(&mut self, game_id: &str) -> Option<RosterChange> {
        let row = self.row_mut(game_id).filter(|row| row.pending_removal)?;
        row.pending_removal = false;
        Some(RosterChange::Restored(game_id.to_string()))
    }

    /// Apply seats confirmed by the server. `None` leaves a seat as it is;
    /// `Some(None)` empties it. Hidden rows take the seats but report no change.
    pub fn record_seats(
        &mut self,
        game_id: &str,
        white: Option<Option<PlayerRef>>,
        black: Option<Option<PlayerRef>>,
    ) -> Option<RosterChange> {
        let row = self.row_mut(game_id)?;
        let mut changed = false;
        if let Some(white) = white {
            changed |= row.summary.white_player != white;
            row.summary.white_player = white;
        }
        if let Some(black) = black {
            changed |= row.summary.black_player != black;
            row.summary.black_player = black;
        }
        (changed && !row.pending_removal).then(|| RosterChange::Updated(game_id.to_string()))
    }

    /// The join intent for `identity`. The seat is not marked here; that waits
    /// for the server's update.
    pub fn record_join_requested(&self, identity: &SessionIdentity) -> Option<ClientMessage> {
        identity.is_complete().then(|| identity.to_message())
    }

    fn row(&self, game_id: &str) -> Option<&LobbyRow> {
        self.rows.iter().find(|row| row.summary.game_id == game_id)
    }

    fn row_mut(&mut self, game_id: &str) -> Option<&mut LobbyRow> {
        self.rows.iter_mut().find(|row| row.summary.game_id == game_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str) -> PlayerRef {
        PlayerRef {
            id: Some(name.len().to_string()),
            username: Some(name.to_string()),
        }
    }

    fn roster(ids: &[&str]) -> LobbyRoster {
        let mut roster = LobbyRoster::new();
        for id in ids {
            roster.record_game_created(GameSummary::new(*id));
        }
        roster
    }

    fn ids(roster: &LobbyRoster) -> Vec<&str> {
        roster.iter().map(|row| row.game_id.as_str()).collect()
    }

    #[test]
    fn rows_keep_insertion_order() {
        let roster = roster(&["g3", "g1", "g2"]);
        assert_eq!(ids(&roster), ["g3", "g1", "g2"]);
    }

    #[test]
    fn duplicate_create_replaces_in_place() {
        let mut roster = roster(&["g1", "g2"]);
        let mut updated = GameSummary::new("g1");
        updated.white_player = Some(player("alice"));

        assert_eq!(
            roster.record_game_created(updated.clone()),
            RosterChange::Updated("g1".into())
        );
        assert_eq!(roster.len(), 2);
        assert_eq!(ids(&roster), ["g1", "g2"]);
        assert_eq!(roster.get("g1"), Some(&updated));
    }

    #[test]
    fn removing_unknown_game_is_a_no_op() {
        let mut roster = roster(&["g1"]);
        assert_eq!(roster.record_game_removed("nope"), None);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn removing_known_game_drops_the_row() {
        let mut roster = roster(&["g1", "g2"]);
        assert_eq!(
            roster.record_game_removed("g1"),
            Some(RosterChange::Removed("g1".into()))
        );
        assert_eq!(ids(&roster), ["g2"]);
    }

    #[test]
    fn predicted_removal_is_confirmed_by_server() {
        let mut roster = roster(&["g1", "g2"]);
        roster.predict_removal("g1");
        assert!(roster.is_pending_removal("g1"));
        assert_eq!(ids(&roster), ["g2"]);

        assert_eq!(roster.record_game_removed("g1"), None);
        assert!(!roster.is_pending_removal("g1"));
        assert_eq!(roster.reinstate("g1"), None);
    }

    #[test]
    fn predicted_removal_is_undone_when_server_disagrees() {
        let mut roster = roster(&["g1", "g2", "g3"]);
        roster.predict_removal("g2");

        assert_eq!(roster.reinstate("g2"), Some(RosterChange::Restored("g2".into())));
        assert_eq!(ids(&roster), ["g1", "g2", "g3"]);

        roster.predict_removal("g1");
        assert_eq!(
            roster.record_game_created(GameSummary::new("g1")),
            RosterChange::Restored("g1".into())
        );
        assert_eq!(ids(&roster), ["g1", "g2", "g3"]);
        assert!(!roster.is_pending_removal("g1"));
    }

    #[test]
    fn several_restored_rows_keep_display_order() {
        let mut roster = roster(&["g1", "g2", "g3", "g4"]);
        roster.predict_removal("g1");
        roster.predict_removal("g2");
        roster.predict_removal("g4");
        assert_eq!(ids(&roster), ["g3"]);

        roster.reinstate("g1");
        roster.reinstate("g4");
        roster.reinstate("g2");
        assert_eq!(ids(&roster), ["g1", "g2", "g3", "g4"]);
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn predicting_twice_or_an_unknown_game_does_nothing() {
        let mut roster = roster(&["g1"]);
        assert!(roster.predict_removal("g1").is_some());
        assert_eq!(roster.predict_removal("g1"), None);
        assert_eq!(roster.predict_removal("nope"), None);
        assert_eq!(roster.reinstate("nope"), None);
        assert!(roster.get("g1").is_none());
    }

    #[test]
    fn seats_change_only_when_named() {
        let mut roster = roster(&["g1"]);
        assert_eq!(
            roster.record_seats("g1", Some(Some(player("alice"))), None),
            Some(RosterChange::Updated("g1".into()))
        );
        assert_eq!(roster.record_seats("g1", Some(Some(player("alice"))), None), None);
        assert_eq!(roster.record_seats("other", Some(None), None), None);

        let row = roster.get("g1").unwrap();
        assert_eq!(row.white_player, Some(player("alice")));
        assert_eq!(row.black_player, None);
    }

    #[test]
    fn join_request_does_not_fill_the_seat() {
        let roster = roster(&["g1"]);
        let identity = SessionIdentity {
            user_id: "42".into(),
            game_id: "g1".into(),
            color: "black".into(),
        };
        assert!(roster.record_join_requested(&identity).is_some());
        assert_eq!(roster.get("g1").unwrap().black_player, None);

        let missing_user = SessionIdentity {
            user_id: String::new(),
            ..identity
        };
        assert_eq!(roster.record_join_requested(&missing_user), None);
    }
}
