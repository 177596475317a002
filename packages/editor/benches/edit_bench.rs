use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polaris_editor::{Command, EditSession, EditorConfig};
use polaris_parser::SuggestionCandidate;

fn candidates() -> Vec<SuggestionCandidate> {
    (0..50)
        .map(|i| SuggestionCandidate::new(format!("Field {}", i), format!("field_{}", i)))
        .collect()
}

fn typing_run(c: &mut Criterion) {
    c.bench_function("typing_run", |b| {
        b.iter(|| {
            let mut session = EditSession::new("bench", "", EditorConfig::default());
            for ch in "Published on {post_date} by {author}".chars() {
                session.dispatch(Command::InsertText {
                    text: ch.to_string(),
                });
            }
            black_box(session.value())
        })
    });
}

fn insert_variables(c: &mut Criterion) {
    c.bench_function("insert_variables", |b| {
        b.iter(|| {
            let mut session = EditSession::new("bench", "", EditorConfig::default())
                .with_candidates(candidates());
            for i in 0..20 {
                session.dispatch(Command::InsertText {
                    text: "@fie".to_string(),
                });
                session.dispatch(Command::SelectSuggestion {
                    value: format!("field_{}", i),
                });
            }
            black_box(session.value())
        })
    });
}

fn suggestions_at_caret(c: &mut Criterion) {
    let mut session =
        EditSession::new("bench", &"{field_1} text ".repeat(40), EditorConfig::default())
            .with_candidates(candidates());
    session.dispatch(Command::InsertText {
        text: "@Field 4".to_string(),
    });

    c.bench_function("suggestions_at_caret", |b| {
        b.iter(|| black_box(session.suggestions()))
    });
}

criterion_group!(benches, typing_run, insert_variables, suggestions_at_caret);
criterion_main!(benches);
