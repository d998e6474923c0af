// Integration test for the coefficient path
// (decimal text -> FixedPointEncoder -> hex table -> decode, plus 64-bit truncation)
use fixtab::core::{
    encode_stream, truncate_stream, FixedPointWord, LiteralStyle, StreamError, MAGNITUDE_BITS,
};
use fixtab::{
    BitQuantizer, BitWidthTruncator, EncodingStrategy, ErrorPolicy, FixedPointEncoder,
    OverflowPolicy, TableFormatter,
};

fn parse_table(text: &str) -> Vec<u32> {
    text.lines()
        .map(|l| {
            let hex = l.trim_start_matches('"').trim_end_matches("\",");
            u32::from_str_radix(hex, 16).unwrap()
        })
        .collect()
}

/// A windowed-sinc filter written as text, encoded through the stream,
/// read back and decoded: every tap within one LSB of its input.
#[test]
fn test_filter_taps_survive_encode_decode() {
    let taps: Vec<f64> = (-32i32..=32)
        .map(|n| {
            let x = n as f64 * 0.25;
            let sinc = if n == 0 { 1.0 } else { (std::f64::consts::PI * x).sin() / (std::f64::consts::PI * x) };
            let window = 0.54 + 0.46 * (std::f64::consts::PI * n as f64 / 32.0).cos();
            sinc * window
        })
        .collect();
    let input: String = taps.iter().map(|t| format!("{:.12}\n", t)).collect();
    let lsb = 2f64.powi(-(MAGNITUDE_BITS as i32));

    for strategy in [
        EncodingStrategy::OffsetMagnitude,
        EncodingStrategy::TwosComplement,
        EncodingStrategy::SignMagnitude,
    ] {
        let encoder = FixedPointEncoder::new(strategy, OverflowPolicy::Reject);
        let mut out = Vec::new();
        let report = encode_stream(
            input.as_bytes(),
            &mut out,
            &encoder,
            &TableFormatter::one_per_line(),
            ErrorPolicy::Abort,
        )
        .unwrap();
        assert_eq!(report.written, taps.len());
        assert_eq!(report.skipped, 0);

        let words = parse_table(&String::from_utf8(out).unwrap());
        assert_eq!(words.len(), taps.len());
        for (raw, tap) in words.into_iter().zip(&taps) {
            let word = FixedPointWord::from_raw(raw).unwrap();
            let parsed: f64 = format!("{:.12}", tap).parse().unwrap();
            let decoded = encoder.decode(&word);
            assert!(
                (decoded - parsed).abs() <= lsb + f64::EPSILON,
                "{:?}: {} decoded as {}",
                strategy,
                parsed,
                decoded
            );
            assert_eq!(word.sign(), parsed < 0.0, "{:?} sign of {}", strategy, parsed);
        }
    }
}

/// The quantizer output for a magnitude is the low 31 bits of the positive word.
#[test]
fn test_positive_words_match_quantizer() {
    let encoder = FixedPointEncoder::default();
    let quantizer = BitQuantizer::new(MAGNITUDE_BITS, OverflowPolicy::Saturate).unwrap();
    for c in [0.0, 0.1, 0.333, 0.5, 0.75, 0.999_999] {
        let word = encoder.encode(c).unwrap();
        assert_eq!(word.magnitude(), &quantizer.quantize(c).unwrap());
        assert!(!word.sign());
    }
}

/// Abort reports the offending line; skip carries on and counts it.
#[test]
fn test_error_policies_on_dirty_input() {
    let input = "0.5\n\n1.5e0\nnot-a-number\n-0.25\n";
    let encoder = FixedPointEncoder::new(EncodingStrategy::OffsetMagnitude, OverflowPolicy::Reject);
    let formatter = TableFormatter::one_per_line();

    let err = encode_stream(input.as_bytes(), Vec::new(), &encoder, &formatter, ErrorPolicy::Abort)
        .unwrap_err();
    assert!(matches!(err, StreamError::Encode { line: 3, .. }), "{}", err);

    let mut out = Vec::new();
    let report =
        encode_stream(input.as_bytes(), &mut out, &encoder, &formatter, ErrorPolicy::Skip).unwrap();
    assert_eq!(report.written, 2);
    assert_eq!(report.skipped, 2);
    assert_eq!(String::from_utf8(out).unwrap(), "\"40000000\",\n\"E0000000\",\n");
}

/// Encoded words widened to 64-bit binary literals, then cut back down:
/// each narrow literal is the top of the original word.
#[test]
fn test_truncate_binary_expansion() {
    let encoder = FixedPointEncoder::default();
    let coefficients = [0.0, 0.1, -0.1, 0.5, -0.5, 0.999, -0.999];
    let input: String = coefficients
        .iter()
        .map(|&c| {
            let raw = encoder.encode(c).unwrap().raw();
            format!("{:032b}{:032b}\n", raw, 0u32)
        })
        .collect();

    for width in [1usize, 8, 16, 24, 32] {
        let truncator = BitWidthTruncator::new(64, width).unwrap();
        let mut out = Vec::new();
        let report = truncate_stream(
            input.as_bytes(),
            &mut out,
            &truncator,
            &TableFormatter::new(1, LiteralStyle::Bare),
            ErrorPolicy::Abort,
        )
        .unwrap();
        assert_eq!(report.written, coefficients.len());

        let text = String::from_utf8(out).unwrap();
        for (line, &c) in text.lines().zip(&coefficients) {
            let full = format!("{:032b}", encoder.encode(c).unwrap().raw());
            assert_eq!(line, &full[..width]);
        }
    }
}
