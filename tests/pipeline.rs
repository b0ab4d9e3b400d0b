//! End-to-end tests through the library: JSON match records in, labelled
//! datasets out.

use lineup_grid::compose::{compose, ComposeError};
use lineup_grid::config::ComposeConfig;
use lineup_grid::dataset::{
    BalanceError, MatchError, MatchVectorAssembler, OutcomeLabel, ScalingMode,
};
use lineup_grid::grid::{GridError, GridEvent, TeamGridBuilder};
use lineup_grid::pitch::{classify, Position, ZoneError, ZoneId};
use lineup_grid::record::{load_matches_from_str, MatchRecord, PlayerRecord, Side};
use lineup_grid::skill::{RawField, SkillPayload, SKILL_LEN};

fn current(rating: f64) -> SkillPayload {
    SkillPayload::from_fields((0..SKILL_LEN).map(|_| RawField::Number(rating)).collect())
}

fn legacy(rating: f64) -> SkillPayload {
    let mut fields = vec![RawField::Text("78 kg".into())];
    fields.extend((0..SKILL_LEN - 1).map(|_| RawField::Number(rating)));
    SkillPayload::from_fields(fields)
}

fn starter(name: &str, number: u32, top: f64, left: f64, skill: SkillPayload) -> PlayerRecord {
    PlayerRecord::new(name, number)
        .at(top, left)
        .with_skill(skill)
}

/// 4-4-2 with one legacy-schema striker, a rated sub and an unrated sub.
fn home_442() -> Vec<PlayerRecord> {
    vec![
        starter("gk", 1, 5.0, 50.0, current(80.0)),
        starter("rb", 2, 15.0, 17.0, current(70.0)),
        starter("rcb", 4, 15.0, 33.0, current(72.0)),
        starter("lcb", 5, 15.0, 67.0, current(74.0)),
        starter("lb", 3, 15.0, 83.0, current(68.0)),
        starter("rm", 7, 35.0, 17.0, current(76.0)),
        starter("rcm", 8, 25.0, 33.0, current(78.0)),
        starter("lcm", 6, 25.0, 67.0, current(66.0)),
        starter("lm", 11, 35.0, 83.0, current(64.0)),
        starter("rs", 9, 45.0, 25.0, current(82.0)),
        starter("ls", 10, 45.0, 75.0, legacy(90.0)),
        PlayerRecord::new("sub-rated", 14).with_skill(current(60.0)),
        PlayerRecord::new("sub-unrated", 23),
    ]
}

/// 3-5-2 with two holding midfielders and a playmaker listed after them.
fn away_352() -> Vec<PlayerRecord> {
    vec![
        starter("gk", 1, 5.0, 50.0, current(60.0)),
        starter("rcb", 2, 15.0, 33.0, current(61.0)),
        starter("cb", 3, 15.0, 50.0, current(62.0)),
        starter("lcb", 4, 15.0, 67.0, current(63.0)),
        starter("rwb", 5, 25.0, 17.0, current(64.0)),
        starter("lwb", 6, 25.0, 83.0, current(65.0)),
        starter("cdm-a", 8, 25.0, 50.0, current(66.0)),
        starter("cdm-b", 16, 25.0, 55.0, current(67.0)),
        starter("cam", 10, 35.0, 50.0, current(68.0)),
        starter("rs", 9, 45.0, 25.0, current(69.0)),
        starter("ls", 11, 45.0, 75.0, current(70.0)),
    ]
}

fn fixture_match(score: &str) -> MatchRecord {
    MatchRecord::new(home_442(), away_352(), score)
}

fn row_value(features: &[f32], row: usize, col: usize) -> f32 {
    features[row * SKILL_LEN + col]
}

#[test]
fn back_line_band_is_top_15() {
    for left in [17.0, 33.0, 50.0, 67.0, 83.0] {
        let zone = classify(Position::new(15.0, left)).unwrap();
        assert!((1..=5).contains(&zone.index()), "left {} gave {}", left, zone);
    }
    assert_eq!(
        classify(Position::new(15.2, 49.6)).unwrap(),
        ZoneId::new(3).unwrap()
    );
    assert!(matches!(
        classify(Position::new(60.0, 50.0)),
        Err(ZoneError::NoZoneMatch { .. })
    ));
}

#[test]
fn full_match_layout() {
    let assembler = MatchVectorAssembler::new(TeamGridBuilder::standard(), true);
    let m = assembler
        .assemble(&fixture_match("2-1"), ScalingMode::None)
        .unwrap();
    let f = m.example.features.as_slice();
    assert_eq!(m.example.features.shape(), (80, SKILL_LEN));
    assert_eq!(m.example.label, OutcomeLabel::HomeWin);

    // Home starters in zone order.
    assert_eq!(row_value(f, 0, 0), 80.0);
    assert_eq!(row_value(f, 1, 0), 70.0);
    assert_eq!(row_value(f, 7, 0), 78.0);
    assert_eq!(row_value(f, 16, 0), 82.0);
    // Legacy striker: placeholder at index 11.
    assert_eq!(row_value(f, 18, 0), 90.0);
    assert_eq!(row_value(f, 18, 11), 75.0);
    // Subs fill the bench in roster order; the unrated one gets the
    // rounded team average, with the placeholder left out of index 11.
    assert_eq!(row_value(f, 20, 0), 60.0);
    assert_eq!(row_value(f, 21, 0), 73.0);
    assert_eq!(row_value(f, 21, 11), 72.0);
    assert!((22..40).all(|r| (0..SKILL_LEN).all(|c| row_value(f, r, c) == 0.0)));

    // Away grid starts at row 40. The second holding midfielder takes the
    // playmaker slot, pushing the playmaker onto the centre-forward slot.
    let away = 40;
    assert_eq!(row_value(f, away + 8, 0), 66.0);
    assert_eq!(row_value(f, away + 13, 0), 67.0);
    assert_eq!(row_value(f, away + 17, 0), 68.0);
    assert_eq!(row_value(f, away + 3, 0), 62.0);

    let relocated: Vec<&GridEvent> = m
        .events
        .iter()
        .filter(|(side, _)| *side == Side::Away)
        .map(|(_, e)| e)
        .collect();
    assert_eq!(
        relocated,
        vec![
            &GridEvent::Relocated {
                player: "cdm-b".into(),
                zone: ZoneId::new(8).unwrap(),
                slot: 13
            },
            &GridEvent::Relocated {
                player: "cam".into(),
                zone: ZoneId::new(13).unwrap(),
                slot: 17
            },
        ]
    );
    assert_eq!(m.dropped(), 0);
}

#[test]
fn zone_8_collision_drops_when_fallback_is_taken() {
    let mut record = fixture_match("0-0");
    // Listed before the second holding midfielder: CAM is placed first.
    let cam = record.away.remove(8);
    record.away.insert(6, cam);
    let m = MatchVectorAssembler::new(TeamGridBuilder::standard(), false)
        .assemble(&record, ScalingMode::None)
        .unwrap();

    assert_eq!(m.dropped(), 1);
    assert!(m.events.contains(&(
        Side::Away,
        GridEvent::SlotCollisionDropped {
            player: "cdm-b".into(),
            zone: ZoneId::new(8).unwrap(),
            fallback: Some(13)
        }
    )));
    let f = m.example.features.as_slice();
    assert_eq!(row_value(f, 20 + 13, 0), 68.0);
    assert!(!f.contains(&67.0));
}

#[test]
fn grid_length_is_fixed() {
    let builder = TeamGridBuilder::standard();
    for roster in [home_442(), away_352(), Vec::new()] {
        assert_eq!(builder.build(&roster, false).unwrap().grid.len(), 20);
        assert_eq!(builder.build(&roster, true).unwrap().grid.len(), 40);
    }
}

#[test]
fn rebuilds_are_bit_identical() {
    let records: Vec<MatchRecord> = ["2-1", "0-0", "1-3"].iter().map(|s| fixture_match(s)).collect();
    let config = ComposeConfig::default();
    let a = compose(&records, &config).unwrap();
    let b = compose(&records, &config).unwrap();
    let bits = |c: &lineup_grid::compose::Composition| -> Vec<u32> {
        c.dataset
            .iter()
            .flat_map(|e| e.features.as_slice().iter().map(|v| v.to_bits()))
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn balances_10_4_7() {
    let mut records = Vec::new();
    records.extend((0..10).map(|_| fixture_match("3-1")));
    records.extend((0..4).map(|_| fixture_match("0-0")));
    records.extend((0..7).map(|_| fixture_match("1-2")));

    let unbalanced = compose(&records, &ComposeConfig::default()).unwrap();
    assert_eq!(unbalanced.stats.class_counts, [10, 4, 7]);

    let config = ComposeConfig {
        balance: true,
        seed: 2024,
        ..Default::default()
    };
    let balanced = compose(&records, &config).unwrap();
    assert_eq!(balanced.dataset.len(), 30);
    assert_eq!(balanced.stats.class_counts, [10, 10, 10]);
    for e in balanced.dataset.iter() {
        assert!(unbalanced.dataset.iter().any(|orig| orig == e));
    }
    let labels: Vec<OutcomeLabel> = balanced.dataset.iter().map(|e| e.label).collect();
    let mut sorted = labels.clone();
    sorted.sort();
    assert_ne!(labels, sorted, "balanced dataset should be shuffled");
}

#[test]
fn balancing_without_draws_fails() {
    let records = vec![fixture_match("1-0"), fixture_match("0-1")];
    let config = ComposeConfig {
        balance: true,
        seed: 1,
        ..Default::default()
    };
    assert!(matches!(
        compose(&records, &config),
        Err(ComposeError::Balance(BalanceError::EmptyClass(
            OutcomeLabel::Draw
        )))
    ));
}

#[test]
fn malformed_records_are_skipped() {
    let mut bad_skill = fixture_match("1-1");
    bad_skill.home[1].skill = Some(current(70.0).fields()[..20].to_vec().into());
    let mut bad_spot = fixture_match("1-1");
    bad_spot.away[2].position = Some(Position::new(70.0, 50.0));
    let records = vec![
        fixture_match("2-0"),
        bad_skill,
        fixture_match("10-2"),
        bad_spot,
        fixture_match("abandoned"),
    ];

    let c = compose(&records, &ComposeConfig::default()).unwrap();
    assert_eq!(c.dataset.len(), 2);
    assert_eq!(c.stats.class_counts, [2, 0, 0]);
    let indices: Vec<usize> = c.skipped.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![1, 3, 4]);
    assert!(matches!(
        c.skipped[0].error,
        MatchError::Grid {
            side: Side::Home,
            source: GridError::Skill { .. }
        }
    ));
    assert!(matches!(
        c.skipped[1].error,
        MatchError::Grid {
            side: Side::Away,
            source: GridError::Zone { .. }
        }
    ));
    assert!(matches!(c.skipped[2].error, MatchError::Score(_)));
}

#[test]
fn parses_scraped_json() {
    let json = r#"[{
        "home_team": "Bremen",
        "away_team": "Mainz",
        "date": "2019-03-02",
        "score": "3–1",
        "home": [
            {"name": "Pavlenka", "number": 1, "position": {"top": 5, "left": 50},
             "skill": ["83 kg", 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
                       24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39,
                       40, 41, 42]},
            {"name": "Bargfrede", "number": 44}
        ],
        "away": [
            {"name": "Zentner", "number": 27, "position": {"top": 5.4, "left": 49.8},
             "skill": [10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
                       26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41,
                       42, 43]}
        ]
    }]"#;
    let records = load_matches_from_str(json).unwrap();
    let c = compose(&records, &ComposeConfig::default()).unwrap();
    assert!(c.skipped.is_empty());
    let e = &c.dataset.examples()[0];
    assert_eq!(e.label, OutcomeLabel::HomeWin);
    let f = e.features.as_slice();
    assert_eq!(row_value(f, 0, 10), 20.0);
    assert_eq!(row_value(f, 0, 11), 75.0);
    assert_eq!(row_value(f, 0, 12), 21.0);
    // Unrated bench player copies the only rated teammate.
    assert_eq!(row_value(f, 20, 12), 21.0);
    assert_eq!(row_value(f, 40, 33), 43.0);
    assert_eq!(c.stats.imputed_players, 1);
}

#[test]
fn split_after_compose() {
    let records: Vec<MatchRecord> = (0..10).map(|_| fixture_match("1-0")).collect();
    let c = compose(&records, &ComposeConfig::default()).unwrap();
    let (train, validation) = c.dataset.split(0.8).unwrap();
    assert_eq!(train.len(), 8);
    assert_eq!(validation.len(), 2);
}
