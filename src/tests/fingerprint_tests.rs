//! Unit tests for fingerprint extraction
//!
//! Tests parsing of `fpcalc -raw` output and the failure paths of the
//! process-backed source.

use crate::error::{ExtractError, ExtractResult};
use crate::fingerprint::*;
use crate::types::Fingerprint;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SAMPLE_OUTPUT: &str = "FILE=song.flac\nDURATION=187\nFINGERPRINT=3715084883,3715076691,-579883405\n";

    #[test]
    fn test_parse_marker_among_other_lines() {
        let fp = parse_fpcalc_output(SAMPLE_OUTPUT).unwrap();

        assert_eq!(fp.frames, vec![3715084883, 3715076691, 3715083891]);
        assert_eq!(fp.duration_secs, Some(187));
    }

    #[test]
    fn test_parse_strips_whitespace() {
        let fp = parse_fpcalc_output("FINGERPRINT=1, 2,3 \r\n").unwrap();
        assert_eq!(fp.frames, vec![1, 2, 3]);
        assert_eq!(fp.duration_secs, None, "No DURATION line means no duration");
    }

    #[test]
    fn test_parse_fractional_duration() {
        let fp = parse_fpcalc_output("FINGERPRINT=1\nDURATION=12.6\n").unwrap();
        assert_eq!(fp.duration_secs, Some(13));
    }

    #[test]
    fn test_parse_first_marker_wins() {
        let fp = parse_fpcalc_output("FINGERPRINT=1\nFINGERPRINT=2\n").unwrap();
        assert_eq!(fp.frames, vec![1]);
    }

    #[test]
    fn test_parse_missing_marker() {
        let err = parse_fpcalc_output("DURATION=10\n fingerprint=1\n").unwrap_err();
        assert!(matches!(err, ExtractError::MissingFingerprint));
    }

    #[test]
    fn test_parse_empty_payload() {
        let err = parse_fpcalc_output("FINGERPRINT=\n").unwrap_err();
        assert!(matches!(err, ExtractError::EmptyFingerprint));
    }

    #[test]
    fn test_parse_invalid_value() {
        let err = parse_fpcalc_output("FINGERPRINT=1,abc,3\n").unwrap_err();
        match err {
            ExtractError::InvalidValue { index, value } => {
                assert_eq!(index, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_value_range() {
        assert_eq!(parse_fpcalc_output("FINGERPRINT=4294967295").unwrap().frames, vec![u32::MAX]);
        assert_eq!(parse_fpcalc_output("FINGERPRINT=-1").unwrap().frames, vec![u32::MAX]);
        assert_eq!(
            parse_fpcalc_output("FINGERPRINT=-2147483648").unwrap().frames,
            vec![0x8000_0000]
        );
        assert!(parse_fpcalc_output("FINGERPRINT=4294967296").is_err());
        assert!(parse_fpcalc_output("FINGERPRINT=-2147483649").is_err());
    }

    #[test]
    fn test_fpcalc_arguments() {
        let fpcalc = Fpcalc::new("fpcalc", 120);
        assert_eq!(fpcalc.args(), ["-raw", "-length", "120"]);
        assert_eq!(Fpcalc::new("x", 30).args()[2], "30");
    }

    #[test]
    fn test_missing_tool_is_spawn_error() {
        let fpcalc = Fpcalc::new("fpdiff-no-such-tool", 120);
        let err = fpcalc.fingerprint(Path::new("a.wav")).unwrap_err();

        assert!(matches!(err, ExtractError::Spawn { .. }));
        assert!(err.to_string().contains("fpdiff-no-such-tool"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_reported() {
        // `false` ignores its arguments and exits 1
        let err = Fpcalc::new("false", 120)
            .fingerprint(Path::new("a.wav"))
            .unwrap_err();

        assert!(matches!(err, ExtractError::ExitStatus { .. }));
        assert!(err.to_string().starts_with("command returned"));
    }

    #[cfg(unix)]
    #[test]
    fn test_success_without_marker() {
        // `true` exits 0 with no output
        let err = Fpcalc::new("true", 120)
            .fingerprint(Path::new("a.wav"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::MissingFingerprint));
    }

    #[test]
    fn test_closure_source() {
        let source = |_: &Path| -> ExtractResult<Fingerprint> { Ok(Fingerprint::new(vec![1, 2])) };
        assert_eq!(source.fingerprint(Path::new("x")).unwrap().len(), 2);
    }
}
