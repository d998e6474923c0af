// Integration test for the density ROM
// (LutConfig -> Sweep -> Density -> BitQuantizer -> TableFormatter)
use fixtab::lut::{DistributionKind, Gaussian, Laplace, SweepMode};
use fixtab::{LutBuilder, LutConfig};

/// The default configuration is the 4096 x 12-bit standard-normal ROM.
#[test]
fn test_standard_normal_rom() {
    let table = LutBuilder::new(LutConfig::default()).unwrap().build().unwrap();
    assert_eq!(table.len(), 4096);

    let first = table.get(0).unwrap();
    assert_eq!(first.x, -2.0);
    assert_eq!(first.value.to_binary_string(), "000011011101"); // 221

    let peak = table.get(2048).unwrap();
    assert_eq!(peak.x, 0.0);
    assert_eq!(peak.value.to_binary_string(), "011001100010"); // 1634
    assert!(table.entries().iter().all(|e| e.value.to_word() <= 1634));

    // symmetric about address 2048
    for k in 1..2048 {
        assert_eq!(
            table.get(2048 - k).unwrap().value,
            table.get(2048 + k).unwrap().value,
            "asymmetry at offset {}",
            k
        );
    }

    let text = table.render(&LutConfig::default().formatter());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 410);
    assert!(lines[..409].iter().all(|l| l.len() == 10 * 15));
    assert_eq!(lines[409].len(), 6 * 15);
    assert!(text.ends_with("\",\n"));
}

/// Accumulated sweeps reproduce tables generated by summing dx; the count
/// may differ from the request by one but the samples track the indexed grid.
#[test]
fn test_accumulated_sweep_tracks_indexed() {
    let indexed = LutBuilder::new(LutConfig::default()).unwrap().build().unwrap();
    let accumulated = LutBuilder::new(LutConfig {
        sweep: SweepMode::Accumulated,
        ..LutConfig::default()
    })
    .unwrap()
    .build()
    .unwrap();

    assert!(accumulated.len().abs_diff(4096) <= 1);
    for (a, b) in indexed.entries().iter().zip(accumulated.entries()) {
        assert!((a.x - b.x).abs() < 1e-9);
        assert!(a.value.to_word().abs_diff(b.value.to_word()) <= 1);
    }
}

/// A narrow distribution peaks above full scale and saturates to all ones.
#[test]
fn test_narrow_density_saturates() {
    let config = LutConfig {
        std_dev: 0.1,
        entries: 256,
        bits: 8,
        ..LutConfig::default()
    };
    let table = LutBuilder::new(config).unwrap().build().unwrap();
    let center = table.get(128).unwrap();
    assert!(center.density > 1.0);
    assert_eq!(center.value.to_binary_string(), "11111111");
}

/// Custom densities plug into the builder, and Laplace tables are sharper at the mean.
#[test]
fn test_laplace_vs_gaussian() {
    let config = LutConfig {
        entries: 1024,
        bits: 16,
        ..LutConfig::default()
    };
    let gauss = LutBuilder::with_density(config, Box::new(Gaussian::standard()))
        .unwrap()
        .build()
        .unwrap();
    let laplace = LutBuilder::with_density(config, Box::new(Laplace::new(0.0, 1.0).unwrap()))
        .unwrap()
        .build()
        .unwrap();
    let by_kind = LutBuilder::new(LutConfig {
        distribution: DistributionKind::Laplace,
        ..config
    })
    .unwrap()
    .build()
    .unwrap();

    assert_eq!(laplace, by_kind);
    assert!(laplace.get(512).unwrap().value.to_word() > gauss.get(512).unwrap().value.to_word());
}

/// JSON configs round-trip through serde with defaults for missing fields.
#[test]
fn test_config_from_json() {
    let config: LutConfig =
        serde_json::from_str(r#"{"distribution": "laplace", "mean": 3.0, "entries": 64}"#).unwrap();
    assert_eq!(config.distribution, DistributionKind::Laplace);
    assert_eq!(config.mean, 3.0);
    assert_eq!(config.entries, 64);
    assert_eq!(config.bits, 12);

    let table = LutBuilder::new(config).unwrap().build().unwrap();
    assert_eq!(table.len(), 64);
    assert_eq!(table.get(32).unwrap().x, 3.0);
}
