use crate::models::ActivityDirectory;
use crate::session::SessionState;
use serde::Serialize;

pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ActivityListView {
    Loaded {
        cards: Vec<ActivityCard>,
        /// Choices for the signup form; empty for guests.
        options: Vec<String>,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: ParticipantsBlock,
    pub signup_control: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "lowercase")]
pub enum ParticipantsBlock {
    Empty,
    List(Vec<ParticipantRow>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantRow {
    pub email: String,
    pub removal_control: bool,
}

pub fn render_activities(directory: &ActivityDirectory, session: SessionState) -> ActivityListView {
    let admin = session.is_admin();
    let mut cards = Vec::with_capacity(directory.entries.len());
    let mut options = Vec::new();

    for (name, activity) in directory.iter() {
        let participants = if activity.participants.is_empty() {
            ParticipantsBlock::Empty
        } else {
            ParticipantsBlock::List(
                activity
                    .participants
                    .iter()
                    .map(|email| ParticipantRow {
                        email: email.clone(),
                        removal_control: admin,
                    })
                    .collect(),
            )
        };

        cards.push(ActivityCard {
            name: name.to_string(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: i64::from(activity.max_participants) - activity.participants.len() as i64,
            participants,
            signup_control: admin,
        });

        if admin {
            options.push(name.to_string());
        }
    }

    ActivityListView::Loaded { cards, options }
}

pub fn render_failure() -> ActivityListView {
    ActivityListView::Failed {
        message: LOAD_FAILED.to_string(),
    }
}

impl ActivityListView {
    pub fn cards(&self) -> &[ActivityCard] {
        match self {
            ActivityListView::Loaded { cards, .. } => cards,
            ActivityListView::Failed { .. } => &[],
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            ActivityListView::Loaded { options, .. } => options,
            ActivityListView::Failed { .. } => &[],
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ActivityListView::Failed { message } => Some(message),
            ActivityListView::Loaded { .. } => None,
        }
    }

    #[cfg(test)]
    pub fn removal_controls(&self) -> usize {
        self.cards()
            .iter()
            .map(|card| match &card.participants {
                ParticipantsBlock::Empty => 0,
                ParticipantsBlock::List(rows) => rows.iter().filter(|row| row.removal_control).count(),
            })
            .sum()
    }

    #[cfg(test)]
    pub fn signup_controls(&self) -> usize {
        self.cards().iter().filter(|card| card.signup_control).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Activity;

    fn activity(max: u32, participants: &[&str]) -> Activity {
        Activity {
            description: "desc".to_string(),
            schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
            max_participants: max,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn directory() -> ActivityDirectory {
        ActivityDirectory {
            entries: vec![
                (
                    "Chess Club".to_string(),
                    activity(12, &["michael@mergington.edu", "daniel@mergington.edu"]),
                ),
                ("Art Studio".to_string(), activity(0, &[])),
                ("Gym".to_string(), activity(1, &["a@x.edu", "b@x.edu", "c@x.edu"])),
            ],
        }
    }

    #[test]
    fn chess_club_has_ten_spots_left() {
        let view = render_activities(&directory(), SessionState::Guest);
        assert_eq!(view.cards()[0].name, "Chess Club");
        assert_eq!(view.cards()[0].spots_left, 10);
    }

    #[test]
    fn spots_left_can_be_zero_or_negative() {
        let view = render_activities(&directory(), SessionState::Guest);
        assert_eq!(view.cards()[1].spots_left, 0);
        assert_eq!(view.cards()[2].spots_left, -2);
    }

    #[test]
    fn guest_sees_no_admin_controls() {
        let view = render_activities(&directory(), SessionState::Guest);
        assert_eq!(view.removal_controls(), 0);
        assert_eq!(view.signup_controls(), 0);
        assert!(view.options().is_empty());
    }

    #[test]
    fn admin_sees_one_control_per_participant_and_activity() {
        let view = render_activities(&directory(), SessionState::Admin);
        assert_eq!(view.removal_controls(), 5);
        assert_eq!(view.signup_controls(), 3);
        assert_eq!(view.options(), ["Chess Club", "Art Studio", "Gym"]);
    }

    #[test]
    fn empty_participants_render_placeholder() {
        let view = render_activities(&directory(), SessionState::Admin);
        assert_eq!(view.cards()[1].participants, ParticipantsBlock::Empty);
    }

    #[test]
    fn cards_follow_directory_order() {
        let mut dir = directory();
        dir.entries.reverse();
        let view = render_activities(&dir, SessionState::Guest);
        let names: Vec<&str> = view.cards().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Gym", "Art Studio", "Chess Club"]);
    }

    #[test]
    fn rendering_is_deterministic() {
        let dir = directory();
        assert_eq!(
            render_activities(&dir, SessionState::Admin),
            render_activities(&dir, SessionState::Admin)
        );
    }

    #[test]
    fn failure_view_has_no_cards() {
        let view = render_failure();
        assert!(view.cards().is_empty());
        assert_eq!(view.removal_controls(), 0);
    }
}
