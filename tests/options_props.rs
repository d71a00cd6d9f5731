//! Property checks for the option builders.

use proptest::prelude::*;
use tempfile::tempdir;
use ytkit::{build_audio_options, build_default_options, ensure_directory};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn playlist_suppression_is_inverse_of_playlist_flag(is_playlist in any::<bool>()) {
        let temp = tempdir().unwrap();
        let opts = build_default_options("best", is_playlist, temp.path()).unwrap();
        prop_assert_eq!(opts.no_playlist, !is_playlist);
    }

    #[test]
    fn template_is_rooted_at_directory_for_any_format(
        format in "[a-z0-9+/\\[\\]<=]{1,24}",
        segments in prop::collection::vec("[a-zA-Z0-9_-]{1,8}", 1..4),
    ) {
        let temp = tempdir().unwrap();
        let dir = segments.iter().fold(temp.path().to_path_buf(), |acc, s| acc.join(s));

        let opts = build_default_options(&format, false, &dir).unwrap();
        prop_assert!(dir.is_dir());
        prop_assert_eq!(opts.output_dir(), Some(dir.as_path()));
        prop_assert_eq!(&opts.format, &format);
    }

    #[test]
    fn audio_template_is_rooted_at_directory(name in "[a-zA-Z0-9_-]{1,12}") {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(&name);

        let opts = build_audio_options(&dir).unwrap();
        prop_assert_eq!(opts.output_dir(), Some(dir.as_path()));
        prop_assert!(opts.no_playlist);
    }

    #[test]
    fn ensure_directory_is_idempotent(
        segments in prop::collection::vec("[a-z]{1,6}", 1..5),
        repeats in 1usize..4,
    ) {
        let temp = tempdir().unwrap();
        let dir = segments.iter().fold(temp.path().to_path_buf(), |acc, s| acc.join(s));

        for _ in 0..repeats {
            prop_assert!(ensure_directory(&dir).is_ok());
            prop_assert!(dir.is_dir());
        }
    }
}
