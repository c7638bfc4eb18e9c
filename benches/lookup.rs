use archmage::SimdToken;
use criterion::{BenchmarkGroup, Criterion, Throughput, measurement::WallTime};
use pixlut::{LookupTable, Path, Tuning};

// === SIMD tier detection ===

fn probe<T: SimdToken>() -> &'static str {
    if T::summon().is_some() {
        "available"
    } else {
        "not available"
    }
}

fn print_simd_info() {
    eprintln!("=== SIMD Tier Detection ===");
    #[cfg(target_arch = "x86_64")]
    {
        eprintln!(
            "  AVX2+FMA (x86-64-v3):    {}",
            probe::<archmage::X64V3Token>()
        );
    }
    #[cfg(target_arch = "aarch64")]
    {
        eprintln!(
            "  Arm64-v2:                {}",
            probe::<archmage::Arm64V2Token>()
        );
    }
    #[cfg(target_arch = "wasm32")]
    {
        eprintln!(
            "  WASM SIMD128:            {}",
            probe::<archmage::Wasm128Token>()
        );
    }
    eprintln!("  Scalar:                  always available");
    eprintln!("===========================");
}

// === Scalar disable/enable via archmage ===

fn disable_all_simd() {
    let _ = archmage::dangerously_disable_tokens_except_wasm(true);
}

fn enable_all_simd() {
    let _ = archmage::dangerously_disable_tokens_except_wasm(false);
}

// === Naive baselines ===

fn naive_lookup<T: Copy>(src: &[u8], dst: &mut [T], tables: &[&[T]]) {
    let ch = tables.len();
    for (s, d) in src.chunks_exact(ch).zip(dst.chunks_exact_mut(ch)) {
        for ((out, &v), t) in d.iter_mut().zip(s).zip(tables) {
            *out = t[v as usize];
        }
    }
}

fn naive_lookup_si<T: Copy>(src: &[u8], dst: &mut [T], tables: &[&[T]]) {
    let ch = tables.len();
    for (&s, d) in src.iter().zip(dst.chunks_exact_mut(ch)) {
        for (out, t) in d.iter_mut().zip(tables) {
            *out = t[s as usize];
        }
    }
}

// === Benchmark helpers ===

const W: usize = 1920;
const H: usize = 1080;

fn with_path<'a, T: bytemuck::Pod>(tables: &[&'a [T]], path: Path) -> LookupTable<'a, T> {
    LookupTable::new(tables).unwrap().with_tuning(Tuning {
        path,
        ..Tuning::default()
    })
}

/// Every forced path plus the naive loop, for one channel layout.
fn bench_paths<T: bytemuck::Pod + Default>(
    group: &mut BenchmarkGroup<WallTime>,
    tables: &[&[T]],
    src: &[u8],
    shared: bool,
) {
    let dst_len = if shared {
        src.len() * tables.len()
    } else {
        src.len()
    };
    for (name, path) in [
        ("auto", Path::Auto),
        ("small", Path::Small),
        ("direct", Path::Direct),
        ("fused", Path::Fused),
    ] {
        let table = with_path(tables, path);
        group.bench_function(name, |b| {
            let mut dst = vec![T::default(); dst_len];
            if shared {
                b.iter(|| pixlut::lookup_si(src, &mut dst, &table).unwrap());
            } else {
                b.iter(|| pixlut::lookup(src, &mut dst, &table).unwrap());
            }
        });
    }

    group.bench_function("naive", |b| {
        let mut dst = vec![T::default(); dst_len];
        if shared {
            b.iter(|| naive_lookup_si(src, &mut dst, tables));
        } else {
            b.iter(|| naive_lookup(src, &mut dst, tables));
        }
    });
}

// === Benchmark groups ===

fn bench_gray_u8(c: &mut Criterion) {
    let mut group = c.benchmark_group("gray_u8_to_u8");
    let n = W * H;
    group.throughput(Throughput::Bytes(n as u64));
    let lut: Vec<u8> = (0..=255u8).map(|v| 255 - v).collect();
    let src: Vec<u8> = (0..n).map(|i| (i % 251) as u8).collect();
    let table = LookupTable::single(&lut[..]);

    group.bench_function("pixlut", |b| {
        let mut dst = vec![0u8; n];
        b.iter(|| pixlut::lookup(&src, &mut dst, &table).unwrap());
    });

    disable_all_simd();
    group.bench_function("pixlut_scalar", |b| {
        let mut dst = vec![0u8; n];
        b.iter(|| pixlut::lookup(&src, &mut dst, &table).unwrap());
    });
    enable_all_simd();

    group.bench_function("naive", |b| {
        let mut dst = vec![0u8; n];
        b.iter(|| naive_lookup(&src, &mut dst, &[&lut[..]]));
    });
    group.finish();
}

fn bench_rgb_u8_to_u16(c: &mut Criterion) {
    let mut group = c.benchmark_group("rgb_u8_to_u16");
    let n = W * H * 3;
    group.throughput(Throughput::Bytes(n as u64));
    let owned: Vec<Vec<u16>> = (0..3)
        .map(|ch| (0..256).map(|v| (v * 257) ^ ch).collect())
        .collect();
    let tables: Vec<&[u16]> = owned.iter().map(|t| &t[..]).collect();
    let src: Vec<u8> = (0..n).map(|i| (i % 251) as u8).collect();
    bench_paths(&mut group, &tables, &src, false);
    group.finish();
}

fn bench_rgba_u8_to_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("rgba_u8_to_f32");
    let n = W * H * 4;
    group.throughput(Throughput::Bytes(n as u64));
    let owned: Vec<Vec<f32>> = (0..4)
        .map(|ch| (0..256).map(|v| (v as f32 / 255.0).powf(2.2 + ch as f32 * 0.1)).collect())
        .collect();
    let tables: Vec<&[f32]> = owned.iter().map(|t| &t[..]).collect();
    let src: Vec<u8> = (0..n).map(|i| (i % 251) as u8).collect();
    bench_paths(&mut group, &tables, &src, false);
    group.finish();
}

fn bench_palette_rgba(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette_u8_to_rgba");
    let n = W * H;
    group.throughput(Throughput::Bytes((n * 4) as u64));
    let owned: Vec<Vec<u8>> = (0..4u8)
        .map(|ch| (0..=255u8).map(|v| v.wrapping_mul(ch + 1)).collect())
        .collect();
    let tables: Vec<&[u8]> = owned.iter().map(|t| &t[..]).collect();
    let src: Vec<u8> = (0..n).map(|i| (i % 251) as u8).collect();
    bench_paths(&mut group, &tables, &src, true);
    group.finish();
}

fn bench_rgb_u16(c: &mut Criterion) {
    let mut group = c.benchmark_group("rgb_u16_to_u8");
    let n = W * H * 3;
    group.throughput(Throughput::Bytes((n * 2) as u64));
    let lut: Vec<u8> = (0..65536u32).map(|v| (v >> 8) as u8).collect();
    let src: Vec<u16> = (0..n).map(|i| (i * 37) as u16).collect();
    for (name, path) in [("direct", Path::Direct), ("fused", Path::Fused)] {
        let table = with_path(&[&lut[..]; 3], path);
        group.bench_function(name, |b| {
            let mut dst = vec![0u8; n];
            b.iter(|| pixlut::lookup(&src, &mut dst, &table).unwrap());
        });
    }
    group.finish();
}

#[cfg(feature = "rayon")]
fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("rgb_u8_to_u16_parallel");
    let row = W * 3;
    group.throughput(Throughput::Bytes((row * H) as u64));
    let owned: Vec<Vec<u16>> = (0..3).map(|_| (0..256).map(|v| v * 257).collect()).collect();
    let table = LookupTable::new(&[&owned[0][..], &owned[1][..], &owned[2][..]]).unwrap();
    let src: Vec<u8> = (0..row * H).map(|i| (i % 251) as u8).collect();

    group.bench_function("sequential", |b| {
        let mut dst = vec![0u16; row * H];
        b.iter(|| pixlut::lookup_strided(&src, &mut dst, W, H, row, row, &table).unwrap());
    });
    group.bench_function("rayon", |b| {
        let mut dst = vec![0u16; row * H];
        b.iter(|| pixlut::par::lookup_strided_par(&src, &mut dst, W, H, row, row, &table).unwrap());
    });
    group.finish();
}

// === Custom main for tier detection before criterion runs ===

fn main() {
    print_simd_info();

    let mut criterion = Criterion::default().configure_from_args();
    bench_gray_u8(&mut criterion);
    bench_rgb_u8_to_u16(&mut criterion);
    bench_rgba_u8_to_f32(&mut criterion);
    bench_palette_rgba(&mut criterion);
    bench_rgb_u16(&mut criterion);
    #[cfg(feature = "rayon")]
    bench_parallel(&mut criterion);
    criterion.final_summary();
}
