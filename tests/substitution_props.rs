use std::ffi::OsString;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use watchreact::engine::{classify, Classification};
use watchreact::exec::{ReactionCommand, PLACEHOLDER};
use watchreact::fs::mock::MockFileSystem;
use watchreact::watch::{FsEvent, FsEventKind, MatchPredicate};

// Absolute paths made of whitespace-free segments, so tokenization after
// substitution is predictable.
fn path_strategy() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec("[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,7}", 1..5).prop_map(|segments| {
        let mut path = PathBuf::from("/");
        for segment in segments {
            path.push(segment);
        }
        path
    })
}

proptest! {
    #[test]
    fn target_lands_in_placeholder_position(
        target in path_strategy(),
        program in "[a-z]{1,6}",
        trailing in proptest::collection::vec("--[a-z]{1,6}", 0..3),
    ) {
        let template = format!("{program} {PLACEHOLDER} {}", trailing.join(" "));
        let command = ReactionCommand::new(template).unwrap();

        let invocation = command.invocation_for(&target);

        let trailing: Vec<OsString> = trailing.iter().map(OsString::from).collect();
        prop_assert_eq!(&invocation.program, &OsString::from(&program));
        prop_assert_eq!(invocation.args.len(), 1 + trailing.len());
        prop_assert_eq!(invocation.args[0].as_os_str(), target.as_os_str());
        prop_assert_eq!(&invocation.args[1..], &trailing[..]);
    }

    #[test]
    fn template_without_placeholder_is_unchanged(
        target in path_strategy(),
        words in proptest::collection::vec("[a-z]{1,6}", 1..4),
    ) {
        let command = ReactionCommand::new(words.join(" ")).unwrap();

        let invocation = command.invocation_for(&target);

        prop_assert_eq!(invocation.command_line(), words.join(" "));
    }

    #[test]
    fn closed_write_reacts_iff_predicate_matches(
        target in path_strategy(),
        pattern in prop_oneof![Just("*"), Just("*.rs"), Just("/a*"), Just("*/b/*")],
    ) {
        let predicate = MatchPredicate::from_glob(pattern).unwrap();
        let event = FsEvent::at(FsEventKind::ClosedAfterWrite, &target);

        let got = classify(&event, &predicate, &MockFileSystem::new());

        if predicate.is_match(&target) {
            prop_assert_eq!(got, Classification::React(target.clone()));
        } else {
            prop_assert_eq!(got, Classification::Ignore);
        }
    }

    #[test]
    fn deletions_are_always_structural(target in path_strategy()) {
        let predicate = MatchPredicate::from_glob("*.never").unwrap();
        let event = FsEvent::at(FsEventKind::Deleted, Path::new(&target));

        prop_assert_eq!(
            classify(&event, &predicate, &MockFileSystem::new()),
            Classification::Structural
        );
    }
}
