// Host-side tests for mip chain generation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod mips {
    include!("../src/mips.rs");
}

use image::RgbaImage;
use mips::*;

#[test]
fn level_count_covers_longest_edge() {
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(2, 1), 2);
    assert_eq!(mip_level_count(512, 64), 10);
    assert_eq!(mip_level_count(4096, 4096), 13);
    assert_eq!(mip_level_count(0, 0), 1);
}

#[test]
fn chain_halves_to_one_pixel() {
    let base = RgbaImage::from_pixel(8, 2, image::Rgba([200, 100, 50, 255]));
    let chain = build_mip_chain(base);
    let dims: Vec<(u32, u32)> = chain.iter().map(|l| (l.width, l.height)).collect();
    assert_eq!(dims, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    assert!(chain.iter().all(MipLevel::is_consistent));
}

#[test]
fn flat_colour_survives_downsampling() {
    let base = RgbaImage::from_pixel(16, 16, image::Rgba([10, 20, 30, 255]));
    let chain = build_mip_chain(base);
    let last = chain.last().unwrap();
    assert_eq!(last.rgba, vec![10, 20, 30, 255]);
}

#[test]
fn inconsistent_level_is_detected() {
    let level = MipLevel {
        width: 2,
        height: 2,
        rgba: vec![0; 12],
    };
    assert!(!level.is_consistent());
}
