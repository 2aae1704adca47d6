//! Minifier and beautifier benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kjs_compress::{
    beautify, minify, minify_with, AcceptAll, BeautifyOptions, Blacklist, CompressOptions,
    RenameRegistry,
};

const SAMPLE_SOURCE: &str = r#"
function Menu(root, items) {
    this.root = root;
    this.items = items || [];
    this.open = false;
}

Menu.prototype.toggle = function () {
    this.open = !this.open;
    for (var i = 0; i < this.items.length; i++) {
        var item = this.items[i];
        item.style.display = this.open ? "block" : "none";
    }
    return this.open;
};

function debounce(fn, wait) {
    var timer = null;
    return function () {
        var self = this, args = arguments;
        if (timer) clearTimeout(timer);
        timer = setTimeout(function () { fn.apply(self, args); }, wait);
    };
}

switch (typeof config) {
case "object":
    init(config.menu, config.delay >>> 0);
    break;
default:
    init(document.body, 250);
}
"#;

fn bench_minify(c: &mut Criterion) {
    let program = kjs_parser::parse(SAMPLE_SOURCE).unwrap();
    let plain = CompressOptions::default();
    let obfuscating = CompressOptions::default().with_obfuscate(true);

    let mut group = c.benchmark_group("minify");
    group.throughput(Throughput::Bytes(SAMPLE_SOURCE.len() as u64));

    group.bench_function("plain", |b| {
        b.iter(|| minify(Some(black_box(&program)), &plain, Box::new(AcceptAll)));
    });

    group.bench_function("obfuscate", |b| {
        b.iter(|| {
            let registry =
                RenameRegistry::new(&obfuscating, Blacklist::builtin(), Box::new(AcceptAll));
            minify_with(Some(black_box(&program)), &obfuscating, registry)
        });
    });

    group.finish();
}

fn bench_beautify(c: &mut Criterion) {
    let program = kjs_parser::parse(SAMPLE_SOURCE).unwrap();
    let options = BeautifyOptions::default();

    let mut group = c.benchmark_group("beautify");
    group.throughput(Throughput::Bytes(SAMPLE_SOURCE.len() as u64));

    group.bench_function("sample", |b| {
        b.iter(|| beautify(Some(black_box(&program)), &options));
    });

    group.finish();
}

criterion_group!(benches, bench_minify, bench_beautify);
criterion_main!(benches);
