//! Trigger-event record text
//!
//! Three layouts exist in scenario files:
//! - Fixed: `kind,team_index,value` (team index -1 for none)
//! - NeedDriven: `kind,x`, where `x` is a team index for team events and the
//!   value otherwise
//! - Named: `kind,team_name,value[,extra...]`
//!
//! `kind` is a number or an event name in every layout. Records are always
//! written Fixed.

use nom::bytes::complete::take_till;
use nom::character::complete::char;
use nom::multi::separated_list1;
use nom::sequence::preceded;
use nom::{IResult, Parser};

use crate::core::types::TeamTemplateId;
use crate::trigger::event::{EventDefinition, EventPayload};
use crate::trigger::kind::{DataNeed, EventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Fixed,
    NeedDriven,
    Named,
}

fn field(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == ',').parse(input)
}

fn trailing_fields(input: &str) -> IResult<&str, Vec<&str>> {
    preceded(char(','), separated_list1(char(','), field)).parse(input)
}

/// Kind as a number, or the longest event name the record starts with
///
/// Several names contain commas, so a plain field split is not enough.
fn kind_field(input: &str) -> IResult<&str, EventKind> {
    let (rest, first) = field(input)?;
    if let Ok(index) = first.trim().parse::<i64>() {
        return Ok((rest, EventKind::from_index(index)));
    }

    let lower = input.to_ascii_lowercase();
    let named = EventKind::all()
        .filter(|k| {
            let name = k.name().to_ascii_lowercase();
            lower.starts_with(&name) && matches!(lower.as_bytes().get(name.len()), None | Some(b','))
        })
        .max_by_key(|k| k.name().len());

    match named {
        Some(kind) => Ok((&input[kind.name().len()..], kind)),
        None => Ok((rest, EventKind::from_name(first))),
    }
}

fn number(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

fn team_from_index(index: i64) -> Option<TeamTemplateId> {
    u16::try_from(index).ok().map(TeamTemplateId)
}

/// Which layout a record uses
pub fn detect_format(record: &str) -> Option<RecordFormat> {
    let (rest, _) = kind_field(record.trim()).ok()?;
    if rest.is_empty() {
        return None;
    }
    let (_, fields) = trailing_fields(rest).ok()?;
    match fields.as_slice() {
        [_] => Some(RecordFormat::NeedDriven),
        [team, ..] if number(team).is_some() => Some(RecordFormat::Fixed),
        _ => Some(RecordFormat::Named),
    }
}

/// Read a record in any of the three layouts
///
/// `team_by_name` resolves team names for the Named layout. Malformed
/// records give the `None` kind, which never fires.
pub fn parse_record(
    record: &str,
    team_by_name: impl Fn(&str) -> Option<TeamTemplateId>,
) -> EventDefinition {
    match try_parse(record.trim(), team_by_name) {
        Some(def) => def,
        None => {
            tracing::warn!("Malformed trigger event record {:?}", record);
            EventDefinition::default()
        }
    }
}

fn try_parse(
    record: &str,
    team_by_name: impl Fn(&str) -> Option<TeamTemplateId>,
) -> Option<EventDefinition> {
    let (rest, kind) = kind_field(record).ok()?;
    if rest.is_empty() {
        return Some(EventDefinition::new(kind, EventPayload::None));
    }
    let (_, fields) = trailing_fields(rest).ok()?;
    let need = kind.data_need();

    let (team, value) = match fields.as_slice() {
        [x] => {
            let x = number(x)?;
            if need == DataNeed::Team {
                (team_from_index(x), 0)
            } else {
                (None, x)
            }
        }
        [team, value, ..] => {
            let value = number(value)?;
            match number(team) {
                Some(index) => (team_from_index(index), value),
                None => {
                    let name = team.trim();
                    let team = if name.eq_ignore_ascii_case("none") {
                        None
                    } else {
                        team_by_name(name)
                    };
                    (team, value)
                }
            }
        }
        [] => return None,
    };

    Some(EventDefinition {
        kind,
        payload: EventPayload::from_value(need, value),
        team,
    })
}

/// Write a record in the Fixed layout
pub fn write_record(def: &EventDefinition) -> String {
    let team = def.team.map_or(-1, |t| t.0 as i64);
    format!("{},{},{}", def.kind.index(), team, def.payload.value())
}
