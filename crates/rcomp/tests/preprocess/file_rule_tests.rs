use super::test_utilities::*;
use rcomp::{FileArgRule, RcompError, argv::rule_for, decode_payload, encode_payload, prepare_argv};

#[tokio::test]
async fn test_ltl2ba_inlines_flagged_file() {
    let files = InputFiles::new();
    let spec = files.write("spec.txt", b"a & b");

    let prepared = prepare_argv("ltl2ba", args(&["-F", &spec])).await.unwrap();

    assert_eq!(prepared.len(), 2);
    assert_eq!(prepared[0], "-F");
    assert_eq!(prepared[1], encode_payload(b"a & b").unwrap());
    assert_eq!(decode_payload(&prepared[1]).unwrap(), b"a & b");
}

#[tokio::test]
async fn test_ltl2ba_leaves_unflagged_tokens_alone() {
    let files = InputFiles::new();
    let formula = files.write("formula.ltl", b"[]<> p");

    let argv = args(&["-d", "-f", "!p", "-F", &formula, "-l"]);
    let prepared = prepare_argv("ltl2ba", argv.clone()).await.unwrap();

    assert_eq!(prepared.len(), argv.len());
    for index in [0, 1, 2, 3, 5] {
        assert_eq!(prepared[index], argv[index]);
    }
    assert_eq!(decode_payload(&prepared[4]).unwrap(), b"[]<> p");
}

#[tokio::test]
async fn test_gr1c_inlines_non_flag_tokens() {
    let files = InputFiles::new();
    let x = files.write("x.txt", b"ENV: x;");
    let y = files.write("y.txt", b"SYS: y;");

    let prepared = prepare_argv("gr1c", args(&[&x, "-v", &y])).await.unwrap();

    assert_eq!(prepared.len(), 3);
    assert_eq!(decode_payload(&prepared[0]).unwrap(), b"ENV: x;");
    assert_eq!(prepared[1], "-v");
    assert_eq!(decode_payload(&prepared[2]).unwrap(), b"SYS: y;");
}

#[tokio::test]
async fn test_gr1c_treats_everything_after_separator_as_file() {
    let files = InputFiles::new();
    let spec = files.write("z.spc", b"SYS: z;");

    let prepared = prepare_argv("gr1c", args(&["-r", "--", &spec]))
        .await
        .unwrap();

    assert_eq!(prepared[0], "-r");
    assert_eq!(prepared[1], "--");
    assert_eq!(decode_payload(&prepared[2]).unwrap(), b"SYS: z;");
}

#[tokio::test]
async fn test_missing_file_aborts_preparation() {
    let files = InputFiles::new();
    let present = files.write("present.txt", b"ok");
    let missing = files.missing("absent.txt");

    let result = prepare_argv("gr1c", args(&[&present, &missing])).await;

    match result {
        Err(RcompError::FileRead { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected FileRead error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_binary_contents_survive_inlining() {
    let files = InputFiles::new();
    let contents: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let blob = files.write("blob.bin", &contents);

    let prepared = prepare_argv("ltl2ba", args(&["-F", &blob])).await.unwrap();

    assert_eq!(decode_payload(&prepared[1]).unwrap(), contents);
}

#[test_log::test]
fn test_argv_length_is_preserved_by_every_rule() {
    let samples = [
        args(&[]),
        args(&["-F"]),
        args(&["a", "-b", "--", "c", "-d"]),
        args(&["-F", "x", "-F", "y", "z"]),
    ];
    for (name, _) in rcomp::argv::FILE_ARG_RULES {
        let rule: FileArgRule = rule_for(name).unwrap();
        for argv in &samples {
            let positions = rule.file_positions(argv);
            assert!(positions.iter().all(|&p| p < argv.len()));
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
