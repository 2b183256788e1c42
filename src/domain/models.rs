use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::LeagueSettings;

pub type PlayerId = i64;
pub type ContestantId = i64;
pub type LayoutId = i64;
pub type CourseId = i64;
pub type CardId = i64;
pub type EventId = i64;
pub type LeagueId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub pdga_number: Option<i64>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn last_name_initial(&self) -> Option<char> {
        self.last_name.chars().next()
    }

    /// First name if no one else in `roster` shares it, else first name plus
    /// last initial if that is unique, else the full name.
    pub fn shortest_name(&self, roster: &[Player]) -> String {
        let first_name = self.first_name.to_lowercase();
        let same_first: Vec<&Player> = roster
            .iter()
            .filter(|p| p.first_name.to_lowercase() == first_name)
            .collect();

        if same_first.len() <= 1 {
            return self.first_name.clone();
        }

        let initial = self.last_name_initial();
        let same_initial = same_first
            .iter()
            .filter(|p| p.last_name_initial() == initial)
            .count();

        match initial {
            Some(c) if same_initial == 1 => format!("{} {}", self.first_name, c),
            _ => self.full_name(),
        }
    }
}

/// A player's entry in one league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contestant {
    pub id: ContestantId,
    pub player_id: PlayerId,
    /// None until the engine seeds it from enough completed rounds
    #[serde(default)]
    pub initial_handicap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub number: u32,
    #[serde(default = "default_par")]
    pub par: u32,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_par() -> u32 {
    3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub id: LayoutId,
    pub name: String,
    pub holes: Vec<Hole>,
}

impl Layout {
    pub fn par(&self) -> i32 {
        self.holes.iter().map(|h| h.par as i32).sum()
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub layouts: Vec<Layout>,
}

/// One contestant's strokes on one card. `strokes: None` is a DNF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub contestant_id: ContestantId,
    pub strokes: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub event_id: EventId,
    pub course_id: CourseId,
    pub layout_id: LayoutId,
    pub date: NaiveDateTime,
}

impl Card {
    pub fn render_date(&self) -> String {
        self.date.format("%a %b %d %H:%M, %Y").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub name: Option<String>,
    pub contestant_id: ContestantId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub league_id: LeagueId,
    pub name: Option<String>,
    pub date: NaiveDateTime,
    /// Cards each contestant is required to play
    pub rounds: u32,
}

impl Event {
    pub fn render_date(&self) -> String {
        self.date.format("%a %b %d, %Y").to_string()
    }

    pub fn display_name(&self) -> String {
        let name = self.name.as_deref().unwrap_or("Event");
        format!("{} - {}", name, self.render_date())
    }
}

/// League with its events in chronological order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub settings: LeagueSettings,
    pub contestants: Vec<Contestant>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub id: LeagueId,
    pub name: String,
    pub contestants: usize,
    pub events: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: PlayerId, first: &str, last: &str) -> Player {
        Player {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email_address: None,
            phone_number: None,
            pdga_number: None,
        }
    }

    #[test]
    fn test_shortest_name() {
        let roster = vec![
            player(1, "Anna", "Berg"),
            player(2, "Erik", "Lund"),
            player(3, "erik", "Holm"),
            player(4, "Sara", "Nord"),
            player(5, "Sara", "Nyberg"),
        ];

        assert_eq!(roster[0].shortest_name(&roster), "Anna");
        assert_eq!(roster[1].shortest_name(&roster), "Erik L");
        assert_eq!(roster[2].shortest_name(&roster), "erik H");
        assert_eq!(roster[3].shortest_name(&roster), "Sara Nord");
    }

    #[test]
    fn test_shortest_name_ignores_non_ascii_case() {
        let roster = vec![
            player(1, "Łukasz", "Nowak"),
            player(2, "łukasz", "Zając"),
            player(3, "Żaneta", "Lis"),
        ];

        assert_eq!(roster[0].shortest_name(&roster), "Łukasz N");
        assert_eq!(roster[1].shortest_name(&roster), "łukasz Z");
        assert_eq!(roster[2].shortest_name(&roster), "Żaneta");
    }

    #[test]
    fn test_layout_par_and_holes() {
        let layout = Layout {
            id: 1,
            name: "Short".to_string(),
            holes: vec![
                Hole { number: 1, par: 3, length: Some(80), notes: None },
                Hole { number: 2, par: 4, length: None, notes: Some("OB left".to_string()) },
                Hole { number: 3, par: 3, length: None, notes: None },
            ],
        };

        assert_eq!(layout.par(), 10);
        assert_eq!(layout.hole_count(), 3);
    }

    #[test]
    fn test_event_display_name() {
        let event = Event {
            id: 1,
            league_id: 1,
            name: None,
            date: NaiveDateTime::parse_from_str("2016-01-09T10:00:00", "%Y-%m-%dT%H:%M:%S").unwrap(),
            rounds: 2,
        };

        assert_eq!(event.display_name(), "Event - Sat Jan 09, 2016");
    }
}
