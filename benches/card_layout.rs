//! Card rendering and fragment parsing benchmarks.

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quotedeck::export::layout::{self, QUOTE_SCALE, TEXT_MAX_WIDTH};
use quotedeck::export::{encode_png, render_card};
use quotedeck::quotes::parser::parse_fragment;

const LONG_QUOTE: &str = "The world as we have created it is a process of our thinking. \
                          It cannot be changed without changing our thinking.";

const FRAGMENT: &str = r#"
    <div class="quote">
        <span class="text">"The world as we have created it is a process of our thinking."</span>
        <span>by <small class="author">Albert Einstein</small>
            <a href="/author/Albert-Einstein">(about)</a>
        </span>
        <div class="tags">
            <a class="tag" href="/tag/change/page/1/">change</a>
            <a class="tag" href="/tag/deep-thoughts/page/1/">deep-thoughts</a>
            <a class="tag" href="/tag/thinking/page/1/">thinking</a>
            <a class="tag" href="/tag/world/page/1/">world</a>
        </div>
    </div>"#;

fn bench_wrap(c: &mut Criterion) {
    c.bench_function("wrap_long_quote", |b| {
        b.iter(|| layout::wrap(black_box(LONG_QUOTE), QUOTE_SCALE, TEXT_MAX_WIDTH))
    });
}

fn bench_render_card(c: &mut Criterion) {
    c.bench_function("render_card", |b| {
        b.iter(|| render_card(black_box(LONG_QUOTE), black_box("Albert Einstein")))
    });
}

fn bench_encode_png(c: &mut Criterion) {
    let img = render_card(LONG_QUOTE, "Albert Einstein");
    c.bench_function("encode_png", |b| b.iter(|| encode_png(black_box(&img)).unwrap()));
}

fn bench_parse_fragment(c: &mut Criterion) {
    let now = Utc::now();
    c.bench_function("parse_fragment", |b| {
        b.iter(|| parse_fragment(black_box(FRAGMENT), "https://quotes.toscrape.com", 1, now))
    });
}

criterion_group!(
    benches,
    bench_wrap,
    bench_render_card,
    bench_encode_png,
    bench_parse_fragment
);
criterion_main!(benches);
