use std::str::FromStr;

use tracing::{debug, warn};
use treasure_quest_core::{AdventurerSpec, Cell, Direction, Instruction, Scenario, TreasureSpec};

use crate::{ScenarioError, FIELD_SEPARATOR};

/// Reads a scenario from its text form.
///
/// Records are accepted in any order; a repeated `C` record replaces the
/// earlier map size. Placements are not validated here, the world rejects
/// the ones that do not fit.
pub fn parse_scenario(text: &str) -> Result<Scenario, ScenarioError> {
    let mut scenario = Scenario::default();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut fields = Fields::new(line, trimmed);
        let kind = fields.kind();
        if kind.starts_with('#') {
            continue;
        }

        match kind {
            "C" => {
                let columns = fields.number('C', "columns")?;
                let rows = fields.number('C', "rows")?;
                scenario.columns = columns;
                scenario.rows = rows;
            }
            "M" => {
                let cell = fields.cell('M')?;
                scenario.mountains.push(cell);
            }
            "T" => {
                let cell = fields.cell('T')?;
                let amount = fields.number('T', "amount")?;
                scenario.treasures.push(TreasureSpec { cell, amount });
            }
            "A" => scenario.adventurers.push(fields.adventurer()?),
            other => {
                return Err(ScenarioError::UnknownRecord {
                    line,
                    kind: other.to_owned(),
                })
            }
        }

        fields.finish();
    }

    debug!(
        rows = scenario.rows,
        columns = scenario.columns,
        mountains = scenario.mountains.len(),
        treasures = scenario.treasures.len(),
        adventurers = scenario.adventurers.len(),
        "scenario parsed"
    );
    Ok(scenario)
}

/// Cursor over the trimmed fields of one record.
struct Fields<'a> {
    line: usize,
    kind: &'a str,
    rest: std::str::Split<'a, &'static str>,
}

impl<'a> Fields<'a> {
    fn new(line: usize, record: &'a str) -> Self {
        let mut rest = record.split(FIELD_SEPARATOR);
        let kind = rest.next().map_or("", str::trim);
        Self { line, kind, rest }
    }

    fn kind(&self) -> &'a str {
        self.kind
    }

    fn next_field(&mut self) -> Option<&'a str> {
        self.rest.next().map(str::trim)
    }

    fn required(&mut self, record: char, field: &'static str) -> Result<&'a str, ScenarioError> {
        self.next_field().ok_or(ScenarioError::MissingField {
            line: self.line,
            record,
            field,
        })
    }

    fn number<T: FromStr>(
        &mut self,
        record: char,
        field: &'static str,
    ) -> Result<T, ScenarioError> {
        let value = self.required(record, field)?;
        value.parse().map_err(|_| ScenarioError::InvalidNumber {
            line: self.line,
            field,
            value: value.to_owned(),
        })
    }

    /// Reads an `x - y` pair into a `(row, column)` cell.
    fn cell(&mut self, record: char) -> Result<Cell, ScenarioError> {
        let column = self.number(record, "x")?;
        let row = self.number(record, "y")?;
        Ok(Cell::new(row, column))
    }

    fn facing(&mut self) -> Result<Direction, ScenarioError> {
        let value = self.required('A', "facing")?;
        let mut chars = value.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(code), None) => code,
            _ => {
                return Err(ScenarioError::InvalidFacing {
                    line: self.line,
                    value: value.to_owned(),
                })
            }
        };
        Ok(Direction::from_code(code).unwrap_or_else(|| {
            warn!(line = self.line, %code, "unknown facing, defaulting to north");
            Direction::North
        }))
    }

    fn adventurer(&mut self) -> Result<AdventurerSpec, ScenarioError> {
        let name = self.required('A', "name")?.to_owned();
        let cell = self.cell('A')?;
        let facing = self.facing()?;

        let (moves, collected) = match (self.next_field(), self.next_field()) {
            (None, _) => (Vec::new(), 0),
            (Some(last), None) if is_count(last) => (Vec::new(), self.count(last)?),
            (Some(moves), None) => (Instruction::parse_sequence(moves), 0),
            (Some(moves), Some(count)) => (Instruction::parse_sequence(moves), self.count(count)?),
        };

        Ok(AdventurerSpec {
            name,
            cell,
            facing,
            moves,
            collected,
        })
    }

    fn count(&self, value: &str) -> Result<u32, ScenarioError> {
        value.parse().map_err(|_| ScenarioError::InvalidNumber {
            line: self.line,
            field: "collected",
            value: value.to_owned(),
        })
    }

    fn finish(mut self) {
        let extra = self.rest.by_ref().count();
        if extra > 0 {
            debug!(line = self.line, extra, "ignoring trailing fields");
        }
    }
}

fn is_count(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|byte| byte.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_axes_into_row_column_order() {
        let scenario = parse_scenario("C - 3 - 4\nM - 1 - 0\nT - 0 - 3 - 2\n").expect("parses");

        assert_eq!((scenario.rows, scenario.columns), (4, 3));
        assert_eq!(scenario.mountains, vec![Cell::new(0, 1)]);
        assert_eq!(scenario.treasures[0].cell, Cell::new(3, 0));
        assert_eq!(scenario.treasures[0].amount, 2);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let scenario = parse_scenario("\n# - a comment\n   \n#note\nC - 2 - 2\n").expect("parses");
        assert_eq!((scenario.rows, scenario.columns), (2, 2));
    }

    #[test]
    fn numeric_last_field_is_a_collected_count() {
        let scenario = parse_scenario("A - Lara - 0 - 3 - S - 3").expect("parses");
        let lara = &scenario.adventurers[0];
        assert_eq!(lara.cell, Cell::new(3, 0));
        assert_eq!(lara.collected, 3);
        assert!(lara.moves.is_empty());
    }

    #[test]
    fn seventh_field_carries_collected_with_moves() {
        let scenario = parse_scenario("A - Lara - 1 - 1 - O - AGD - 4").expect("parses");
        let lara = &scenario.adventurers[0];
        assert_eq!(lara.facing, Direction::West);
        assert_eq!(Instruction::format_sequence(&lara.moves), "AGD");
        assert_eq!(lara.collected, 4);
    }

    #[test]
    fn unknown_facing_falls_back_to_north() {
        let scenario = parse_scenario("A - Lara - 1 - 1 - Q - A").expect("parses");
        assert_eq!(scenario.adventurers[0].facing, Direction::North);
    }

    #[test]
    fn missing_map_line_yields_empty_map() {
        let scenario = parse_scenario("M - 1 - 1").expect("parses");
        assert_eq!((scenario.rows, scenario.columns), (0, 0));
        assert_eq!(scenario.mountains.len(), 1);
    }

    #[test]
    fn reports_the_failing_line() {
        assert_eq!(
            parse_scenario("C - 3 - 4\nX - 1 - 1"),
            Err(ScenarioError::UnknownRecord {
                line: 2,
                kind: "X".to_owned()
            })
        );
        assert_eq!(
            parse_scenario("C - 3\n"),
            Err(ScenarioError::MissingField {
                line: 1,
                record: 'C',
                field: "rows"
            })
        );
        assert_eq!(
            parse_scenario("\nT - 1 - one - 2"),
            Err(ScenarioError::InvalidNumber {
                line: 2,
                field: "y",
                value: "one".to_owned()
            })
        );
        assert_eq!(
            parse_scenario("A - Lara - 1 - 1 - North - A"),
            Err(ScenarioError::InvalidFacing {
                line: 1,
                value: "North".to_owned()
            })
        );
    }
}
