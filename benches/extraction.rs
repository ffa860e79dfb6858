//! Performance benchmarks for rs-colscrape.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small card listing for microbenchmarks
//! - Synthetic listings of growing size, exact and partial class matching

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_colscrape::{dom, inspect, scrape_document, ColumnSpec, Tag};
use url::Url;

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head><title>Abstracts</title></head>
<body>
    <div class="search__card">
        <h3 class="search__card__title"><a class="card-link" href="/abstract/1">First abstract</a></h3>
        <div class="search__card__header__author font-regular">A. Author</div>
        <span class="views">Views: 1200</span>
    </div>
    <div class="search__card">
        <h3 class="search__card__title"><a class="card-link" href="/abstract/2">Second abstract</a></h3>
        <div class="search__card__header__author font-regular">B. Author</div>
        <span class="views">Views: 87</span>
    </div>
</body>
</html>
"#;

fn listing(cards: usize) -> String {
    let mut html = String::from("<html><head><title>Listing</title></head><body>");
    for i in 0..cards {
        html.push_str(&format!(
            r#"<div class="search__card" data-id="{i}">
                 <a class="card-link" href="/abstract/{i}">Abstract {i}</a>
                 <div class="search__card__header__author font-regular">Author {i}</div>
                 <span class="rating">Rating: {}.5/5</span>
               </div>"#,
            i % 5
        ));
    }
    html.push_str("</body></html>");
    html
}

fn specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Title", Tag::A, "card-link"),
        ColumnSpec::new("Link", Tag::A, "card-link").link(),
        ColumnSpec::new("Author", Tag::Div, "search__card__header__author.font-regular"),
        ColumnSpec::new("Rating", Tag::Span, "rating").numeric(),
    ]
}

fn base() -> Url {
    Url::parse("https://esc365.escardio.org/esc-congress/abstract").expect("valid base")
}

fn bench_scrape_sample(c: &mut Criterion) {
    let doc = dom::parse(SAMPLE_HTML);
    let specs = specs();
    let base = base();

    c.bench_function("scrape_document_sample", |b| {
        b.iter(|| scrape_document(black_box(&doc), &base, black_box(&specs)));
    });
}

fn bench_inspect_sample(c: &mut Criterion) {
    let doc = dom::parse(SAMPLE_HTML);
    c.bench_function("inspect_sample", |b| {
        b.iter(|| inspect::inspect(black_box(&doc)));
    });
}

/// Parse plus extraction over listings of increasing size
fn bench_listing_sizes(c: &mut Criterion) {
    let specs = specs();
    let base = base();
    let mut group = c.benchmark_group("listing");

    for cards in [10usize, 100, 1000] {
        let html = listing(cards);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_and_scrape", cards), &html, |b, html| {
            b.iter(|| {
                let doc = dom::parse(black_box(html));
                scrape_document(&doc, &base, &specs)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scrape_sample, bench_inspect_sample, bench_listing_sizes);
criterion_main!(benches);
