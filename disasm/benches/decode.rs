use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use disasm::Mode;
use disasm::listing::Listing;
use std::hint::black_box;

const ARM_OPCODES: [(u32, &str); 8] = [
    (0xE1A0_0000, "nop"),
    (0xE3A0_08FF, "mov_rotated_immediate"),
    (0xE591_0004, "ldr_immediate"),
    (0xE92D_4010, "push"),
    (0xEB00_0002, "bl"),
    (0xE12F_FF1E, "bx_lr"),
    (0xE611_0F12, "sadd16"),
    (0xEE10_0F10, "mrc"),
];

const THUMB_OPCODES: [(u16, &str); 6] = [
    (0x46C0, "nop"),
    (0x4770, "bx_lr"),
    (0xB510, "push"),
    (0x4801, "ldr_literal"),
    (0xD1FE, "bne"),
    (0xBFC6, "it"),
];

fn bench_decode_arm(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_arm");
    for (opcode, name) in ARM_OPCODES {
        group.bench_with_input(BenchmarkId::from_parameter(name), &opcode, |b, &opcode| {
            b.iter(|| disasm::decode_arm(black_box(opcode), black_box(0x0800_0000)));
        });
    }
    group.finish();
}

fn bench_decode_thumb(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_thumb");
    for (opcode, name) in THUMB_OPCODES {
        group.bench_with_input(BenchmarkId::from_parameter(name), &opcode, |b, &opcode| {
            b.iter(|| disasm::decode_thumb(black_box(opcode), black_box(0x0800_0000)));
        });
    }
    group.finish();
}

fn bench_listing(c: &mut Criterion) {
    let image: Vec<u8> = ARM_OPCODES
        .iter()
        .cycle()
        .take(256)
        .flat_map(|(opcode, _)| opcode.to_le_bytes())
        .collect();

    c.bench_function("listing_arm_256", |b| {
        b.iter(|| {
            Listing::new(Mode::Arm, black_box(&image), 0x0800_0000)
                .filter_map(Result::ok)
                .count()
        });
    });
}

criterion_group!(benches, bench_decode_arm, bench_decode_thumb, bench_listing);
criterion_main!(benches);
