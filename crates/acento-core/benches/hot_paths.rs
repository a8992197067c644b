use acento_core::{Detector, KeyEvent, KeyState, SPANISH_CHORDS};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_plain_typing(c: &mut Criterion) {
    let mut detector = Detector::default();
    let down = KeyEvent::down("KeyH");
    let up = KeyEvent::up("KeyH");
    c.bench_function("detector/plain_key_passthrough", |b| {
        b.iter(|| {
            black_box(detector.process_key(&down));
            black_box(detector.process_key(&up));
        });
    });
}

fn bench_accent_chord(c: &mut Criterion) {
    let mut detector = Detector::default();
    let events = [
        KeyEvent::down("ControlLeft"),
        KeyEvent::down("Quote"),
        KeyEvent::down("KeyA"),
        KeyEvent::up("KeyA"),
        KeyEvent::up("Quote"),
        KeyEvent::up("ControlLeft"),
    ];
    c.bench_function("detector/accent_chord_ctrl_quote_a", |b| {
        b.iter(|| {
            for event in &events {
                black_box(detector.process_key(event));
            }
        });
    });
}

fn bench_last_rule_match(c: &mut Criterion) {
    let mut state = KeyState::new();
    for code in ["ControlLeft", "AltLeft", "ShiftLeft", "KeyU"] {
        state.on_key_down(code);
    }
    c.bench_function("chord/match_lowest_priority", |b| {
        b.iter(|| black_box(SPANISH_CHORDS.match_keys(&state)));
    });
}

criterion_group!(
    benches,
    bench_plain_typing,
    bench_accent_chord,
    bench_last_rule_match
);
criterion_main!(benches);
