use treasure_quest_core::{Cell, Instruction, QuestSnapshot, Scenario};

use crate::FIELD_SEPARATOR;

/// Writes the end-of-quest state: map, remaining mountains and treasures,
/// then every adventurer with its collected count.
#[must_use]
pub fn format_final(snapshot: &QuestSnapshot) -> String {
    let mut out = String::new();
    push_record(
        &mut out,
        'C',
        &[snapshot.columns.to_string(), snapshot.rows.to_string()],
    );
    for cell in &snapshot.mountains {
        push_record(&mut out, 'M', &coordinates(*cell));
    }
    for treasure in &snapshot.treasures {
        let [x, y] = coordinates(treasure.cell);
        push_record(&mut out, 'T', &[x, y, treasure.amount.to_string()]);
    }
    for adventurer in &snapshot.adventurers {
        let [x, y] = coordinates(adventurer.cell);
        push_record(
            &mut out,
            'A',
            &[
                adventurer.name.clone(),
                x,
                y,
                adventurer.facing.code().to_string(),
                adventurer.collected.to_string(),
            ],
        );
    }
    out
}

/// Writes a scenario so that [`parse_scenario`](crate::parse_scenario) reads
/// it back unchanged.
///
/// Mountains and treasures keep their order. The move field is omitted for an
/// empty script, and the collected count is appended only when non-zero.
#[must_use]
pub fn format_scenario(scenario: &Scenario) -> String {
    let mut out = String::new();
    push_record(
        &mut out,
        'C',
        &[scenario.columns.to_string(), scenario.rows.to_string()],
    );
    for cell in &scenario.mountains {
        push_record(&mut out, 'M', &coordinates(*cell));
    }
    for treasure in &scenario.treasures {
        let [x, y] = coordinates(treasure.cell);
        push_record(&mut out, 'T', &[x, y, treasure.amount.to_string()]);
    }
    for adventurer in &scenario.adventurers {
        let [x, y] = coordinates(adventurer.cell);
        let mut fields = vec![
            adventurer.name.clone(),
            x,
            y,
            adventurer.facing.code().to_string(),
        ];
        if !adventurer.moves.is_empty() {
            fields.push(Instruction::format_sequence(&adventurer.moves));
        }
        if adventurer.collected > 0 {
            fields.push(adventurer.collected.to_string());
        }
        push_record(&mut out, 'A', &fields);
    }
    out
}

/// Splits a cell into its `x` and `y` text fields.
fn coordinates(cell: Cell) -> [String; 2] {
    [cell.column().to_string(), cell.row().to_string()]
}

fn push_record(out: &mut String, kind: char, fields: &[String]) {
    out.push(kind);
    for field in fields {
        out.push_str(FIELD_SEPARATOR);
        out.push_str(field);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasure_quest_core::{
        AdventurerId, AdventurerSnapshot, AdventurerSpec, Direction, TreasureSnapshot,
    };

    #[test]
    fn final_state_writes_x_before_y() {
        let snapshot = QuestSnapshot {
            rows: 4,
            columns: 3,
            mountains: vec![Cell::new(0, 1), Cell::new(1, 2)],
            treasures: vec![TreasureSnapshot {
                cell: Cell::new(3, 1),
                amount: 2,
            }],
            adventurers: vec![AdventurerSnapshot {
                id: AdventurerId::new(0),
                name: "Lara".to_owned(),
                cell: Cell::new(3, 0),
                facing: Direction::South,
                collected: 3,
            }],
        };

        assert_eq!(
            format_final(&snapshot),
            "C - 3 - 4\nM - 1 - 0\nM - 2 - 1\nT - 1 - 3 - 2\nA - Lara - 0 - 3 - S - 3\n"
        );
    }

    #[test]
    fn west_is_written_as_o() {
        let scenario = Scenario {
            rows: 1,
            columns: 1,
            adventurers: vec![AdventurerSpec {
                name: "Tom".to_owned(),
                cell: Cell::new(0, 0),
                facing: Direction::West,
                moves: Instruction::parse_sequence("ALR"),
                collected: 0,
            }],
            ..Scenario::default()
        };

        assert_eq!(format_scenario(&scenario), "C - 1 - 1\nA - Tom - 0 - 0 - O - AGD\n");
    }

    #[test]
    fn scenario_keeps_collected_alongside_moves() {
        let scenario = Scenario {
            adventurers: vec![AdventurerSpec {
                name: "Yves".to_owned(),
                cell: Cell::new(2, 5),
                facing: Direction::East,
                moves: Instruction::parse_sequence("AA"),
                collected: 2,
            }],
            ..Scenario::default()
        };

        assert_eq!(
            format_scenario(&scenario),
            "C - 0 - 0\nA - Yves - 5 - 2 - E - AA - 2\n"
        );
    }
}
