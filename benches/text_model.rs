//! Benchmarks for the text model, motions and the key-driven edit path
//!
//! Run with: cargo bench text_model

use quill::editable::{BufferId, Mark, Mode, Region, Snippet, TextModel};
use quill::motion::{Motion, Pattern};
use quill::runtime::LocalEditor;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const ID: BufferId = BufferId(0);

fn sample(lines: usize) -> String {
    "The quick brown fox jumps over the lazy dog.\n".repeat(lines)
}

// ============================================================================
// Text model primitives
// ============================================================================

#[divan::bench(args = [1_000, 10_000])]
fn load(bencher: divan::Bencher, lines: usize) {
    let content = sample(lines);
    bencher.bench(|| TextModel::from_text(ID, divan::black_box(&content)));
}

#[divan::bench]
fn insert_char_middle_10k_lines(bencher: divan::Bencher) {
    bencher
        .with_inputs(|| TextModel::from_text(ID, &sample(10_000)))
        .bench_local_refs(|text| {
            let _ = text.insert_char(Mark::new(ID, 5_000, 10), divan::black_box('x'));
        });
}

#[divan::bench]
fn delete_region_across_100_lines(bencher: divan::Bencher) {
    bencher
        .with_inputs(|| TextModel::from_text(ID, &sample(10_000)))
        .bench_local_refs(|text| {
            let region = Region::new(Mark::new(ID, 4_950, 4), Mark::new(ID, 5_050, 4));
            let _ = text.delete_region(region, false);
        });
}

#[divan::bench]
fn insert_multi_line_snippet(bencher: divan::Bencher) {
    let snippet = Snippet::from(sample(50).as_str());
    bencher
        .with_inputs(|| TextModel::from_text(ID, &sample(10_000)))
        .bench_local_refs(|text| {
            let _ = text.insert_text(Mark::new(ID, 5_000, 4), divan::black_box(&snippet));
        });
}

#[divan::bench]
fn to_string_10k_lines(bencher: divan::Bencher) {
    let text = TextModel::from_text(ID, &sample(10_000));
    bencher.bench(|| divan::black_box(&text).to_string());
}

// ============================================================================
// Motions
// ============================================================================

#[divan::bench]
fn word_motion_across_line(bencher: divan::Bencher) {
    let text = TextModel::from_text(ID, &sample(100));
    bencher.bench(|| {
        Motion::NextWordStart.apply_count(Mark::new(ID, 50, 0), &text, Mode::Normal, 9)
    });
}

#[divan::bench]
fn search_to_end_10k_lines(bencher: divan::Bencher) {
    let mut content = sample(10_000);
    content.push_str("needle\n");
    let text = TextModel::from_text(ID, &content);
    let motion = Motion::FindRight(Pattern::new("nee+dle").unwrap());
    bencher.bench(|| motion.apply(Mark::new(ID, 0, 0), &text, Mode::Normal));
}

// ============================================================================
// Key-driven editing
// ============================================================================

#[divan::bench]
fn type_line_in_insert_mode(bencher: divan::Bencher) {
    bencher
        .with_inputs(|| LocalEditor::with_text(&sample(1_000)))
        .bench_local_refs(|editor| {
            let _ = editor.keys("Oquick brown fox\x1b");
        });
}

#[divan::bench]
fn delete_and_undo_lines(bencher: divan::Bencher) {
    bencher
        .with_inputs(|| LocalEditor::with_text(&sample(10_000)))
        .bench_local_refs(|editor| {
            let _ = editor.keys("100dd");
            let _ = editor.keys("u");
        });
}
