use std::fmt::Write;

fn main() {
    divan::main();
}

fn participant(steam_id: u64, team: u8) -> String {
    format!(
        r#"{{"steam_id": {}, "name": "player-{}", "team": {}}}"#,
        steam_id, steam_id, team
    )
}

/// A full match with ten players where every round ends in a five man wipe.
fn synthetic_match(rounds: u64) -> Vec<u8> {
    let mut out = String::from(r#"{"map": "de_dust2", "start_time": "2024-05-01T18:00:00Z"}"#);
    out.push('\n');

    let participants = (0..10)
        .map(|i| participant(i, if i < 5 { 2 } else { 3 }))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, r#"{{"time_ms": 0, "type": "MatchStart", "participants": [{}]}}"#, participants).unwrap();

    let mut time = 1000;
    for round in 1..=rounds {
        // the first five players win every round, on both halves
        let (first, second) = if round > 15 { (3, 2) } else { (2, 3) };

        writeln!(out, r#"{{"time_ms": {}, "type": "RoundStart"}}"#, time).unwrap();
        for i in 0..5 {
            time += 2000;
            let killer = participant(i, first);
            let victim = participant(i + 5, second);
            writeln!(
                out,
                r#"{{"time_ms": {}, "type": "Damage", "attacker": {}, "victim": {}, "health_damage": 100}}"#,
                time, killer, victim
            ).unwrap();
            writeln!(
                out,
                r#"{{"time_ms": {}, "type": "Kill", "victim": {}, "killer": {}, "weapon": "ak47", "headshot": {}}}"#,
                time,
                victim,
                killer,
                i % 2 == 0
            ).unwrap();
        }
        time += 1000;
        writeln!(out, r#"{{"time_ms": {}, "type": "RoundEnd", "winner": {}, "reason": 9}}"#, time, first).unwrap();
        writeln!(
            out,
            r#"{{"time_ms": {}, "type": "RoundMvp", "player": {}}}"#,
            time + 500,
            participant(round % 5, first)
        ).unwrap();

        if round == 15 {
            writeln!(out, r#"{{"time_ms": {}, "type": "PhaseChanged", "phase": 3}}"#, time + 1000).unwrap();
        }
        time += 5000;
    }
    writeln!(out, r#"{{"time_ms": {}, "type": "PhaseChanged", "phase": 5}}"#, time).unwrap();

    out.into_bytes()
}

#[divan::bench(args = [16, 30])]
fn parse_one(bencher: divan::Bencher, rounds: u64) {
    let data = synthetic_match(rounds);
    let config = analysis::ParserConfig::default();

    bencher.bench(|| analysis::parse_one(divan::black_box(&config), divan::black_box(&data)));
}

#[divan::bench(args = [16, 30])]
fn aggregate(bencher: divan::Bencher, rounds: u64) {
    let data = synthetic_match(rounds);
    let recording = analysis::recording::Recording::parse(&data).unwrap();
    let events = recording.events().collect::<Result<Vec<_>, _>>().unwrap();

    bencher.bench(|| {
        analysis::aggregator::MatchAggregator::run(
            analysis::ParserConfig::default(),
            recording.header().clone(),
            divan::black_box(events.clone()).into_iter().map(Ok),
        )
    });
}

#[divan::bench]
fn recording_nuke(bencher: divan::Bencher) {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../testfiles/nuke.jsonl");
    let data = std::fs::read(path).unwrap();

    bencher.bench(|| analysis::parse_one(&analysis::ParserConfig::default(), divan::black_box(&data)));
}
