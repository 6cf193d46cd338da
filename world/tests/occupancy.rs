use std::collections::BTreeSet;

use proptest::prelude::*;
use treasure_quest_core::{Cell, CellType, Command, Direction, MovePlan};
use treasure_quest_world::{self as world, query, World};

fn populated_world(
    rows: i32,
    columns: i32,
    mountains: &[(i32, i32)],
    adventurers: &[(i32, i32, u8)],
    seed: u64,
) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::ConfigureMap { rows, columns }, &mut events);
    for &(row, column) in mountains {
        world::apply(
            &mut world,
            Command::PlaceMountain {
                cell: Cell::new(row, column),
            },
            &mut events,
        );
    }
    for (index, &(row, column, facing)) in adventurers.iter().enumerate() {
        world::apply(
            &mut world,
            Command::RegisterAdventurer {
                name: format!("adventurer-{index}"),
                cell: Cell::new(row, column),
                facing: Direction::CLOCKWISE[usize::from(facing % 4)],
                plan: MovePlan::Improvised {
                    script: Vec::new(),
                    seed: seed.wrapping_add(index as u64),
                },
                collected: 0,
            },
            &mut events,
        );
    }
    world
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]
    #[test]
    fn adventurers_never_share_or_leave_accessible_cells(
        rows in 1_i32..8,
        columns in 1_i32..8,
        mountains in proptest::collection::vec((0_i32..8, 0_i32..8), 0..10),
        adventurers in proptest::collection::vec((0_i32..8, 0_i32..8, any::<u8>()), 1..8),
        seed in any::<u64>(),
        turns in 1_usize..40
    ) {
        let mut world = populated_world(rows, columns, &mountains, &adventurers, seed);
        let mut events = Vec::new();

        for turn in 0..turns {
            world::apply(&mut world, Command::AdvanceTurn, &mut events);

            let view = query::adventurer_view(&world);
            let mut seen = BTreeSet::new();
            for adventurer in view.iter() {
                prop_assert!(
                    seen.insert(adventurer.cell),
                    "turn {turn}: two adventurers share {:?}",
                    adventurer.cell
                );
                prop_assert_eq!(
                    query::cell_type(&world, adventurer.cell),
                    Some(CellType::Plain)
                );
                prop_assert_eq!(query::occupant(&world, adventurer.cell), Some(adventurer.id));
            }
        }
    }
}
