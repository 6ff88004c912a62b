//! Benchmarks for unhwp parsing performance.
//!
//! Run with: cargo bench
//!
//! Synthetic record streams and containers are generated at several sizes
//! to measure the record reader, the section assembler, and the full
//! OLE2-to-document path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::{Cursor, Write};
use unhwp::hwp5::record::{
    HWPTAG_CTRL_HEADER, HWPTAG_LIST_HEADER, HWPTAG_PARA_HEADER, HWPTAG_PARA_TEXT, HWPTAG_TABLE,
};

fn record(tag_id: u16, level: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let size = payload.len() as u32;
    if size >= 0xFFF {
        let word = (tag_id as u32) | ((level as u32) << 10) | (0xFFFu32 << 20);
        out.extend_from_slice(&word.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
    } else {
        let word = (tag_id as u32) | ((level as u32) << 10) | (size << 20);
        out.extend_from_slice(&word.to_le_bytes());
    }
    out.extend_from_slice(payload);
    out
}

fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// A section stream with `paragraph_count` short Korean paragraphs.
fn paragraph_stream(paragraph_count: usize) -> Vec<u8> {
    let text = utf16("한글 워드프로세서 문서의 단락 내용입니다.");
    let mut body = Vec::new();
    for _ in 0..paragraph_count {
        body.extend(record(HWPTAG_PARA_HEADER, 0, &[]));
        body.extend(record(HWPTAG_PARA_TEXT, 0, &text));
    }
    body
}

/// A section stream dominated by tables.
fn table_stream(table_count: usize, rows: u16, cols: u16) -> Vec<u8> {
    let cell_text = utf16("셀");
    let mut geometry = vec![0u8; 12];
    geometry[8..10].copy_from_slice(&rows.to_le_bytes());
    geometry[10..12].copy_from_slice(&cols.to_le_bytes());

    let mut body = Vec::new();
    for _ in 0..table_count {
        body.extend(record(HWPTAG_PARA_HEADER, 0, &[]));
        body.extend(record(HWPTAG_CTRL_HEADER, 0, b" lbt"));
        body.extend(record(HWPTAG_TABLE, 0, &geometry));
        for _ in 0..(rows as usize * cols as usize) {
            body.extend(record(HWPTAG_LIST_HEADER, 1, &[]));
            body.extend(record(HWPTAG_PARA_HEADER, 1, &[]));
            body.extend(record(HWPTAG_PARA_TEXT, 1, &cell_text));
        }
    }
    body
}

/// A complete in-memory HWP file wrapping one section stream.
fn container_with(body: &[u8]) -> Vec<u8> {
    let mut header = vec![0u8; 256];
    header[..17].copy_from_slice(b"HWP Document File");
    header[32..36].copy_from_slice(&[0, 3, 0, 5]);
    header[36..40].copy_from_slice(&1u32.to_le_bytes());

    let mut encoder =
        flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(body).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
    let mut stream = comp.create_stream("/FileHeader").unwrap();
    stream.write_all(&header).unwrap();
    drop(stream);
    comp.create_storage("/BodyText").unwrap();
    let mut stream = comp.create_stream("/BodyText/Section0").unwrap();
    stream.write_all(&compressed).unwrap();
    drop(stream);
    comp.into_inner().into_inner()
}

fn bench_section_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("section_assembly");
    for paragraph_count in [100usize, 1_000, 10_000] {
        let body = paragraph_stream(paragraph_count);
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("paragraphs", paragraph_count),
            &body,
            |b, body| b.iter(|| unhwp::hwp5::assemble_section(0, black_box(body))),
        );
    }

    let body = table_stream(50, 10, 5);
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_with_input(BenchmarkId::new("tables", 50), &body, |b, body| {
        b.iter(|| unhwp::hwp5::assemble_section(0, black_box(body)))
    });
    group.finish();
}

fn bench_full_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_parse");
    for paragraph_count in [1_000usize, 10_000] {
        let data = container_with(&paragraph_stream(paragraph_count));
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("hwp5", paragraph_count),
            &data,
            |b, data| {
                b.iter(|| {
                    unhwp::Hwp5Parser::from_bytes(black_box(data.clone()))
                        .unwrap()
                        .parse()
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_section_assembly, bench_full_parse);
criterion_main!(benches);
