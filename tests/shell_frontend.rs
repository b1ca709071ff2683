//! End-to-end tests for line submission: tokenize, redirect, split, dispatch.

mod common;

use common::{drain, memory, toks, MemoryOpener};
use simshell::config::{ShellConfig, SyntaxConfig};
use simshell::pty::SharedStream;
use simshell::shell::{
    extract_redirection, split_pipeline, tokenize, PipelineStage, RedirectMode, RedirectionSpec,
    ShellFrontend, StaticCompletions,
};
use simshell::{ParseError, ShellError};
use std::sync::Arc;

/// Minimal dispatcher: runs stages in order against their assigned streams.
fn run(stages: &[PipelineStage]) {
    for stage in stages {
        match stage.command() {
            "echo" => {
                let text = format!("{}\n", stage.args().join(" "));
                stage.output.write(text.as_bytes()).unwrap();
            }
            "upper" => {
                let text = drain(stage.input.as_ref()).to_uppercase();
                stage.output.write(text.as_bytes()).unwrap();
            }
            "grep" => {
                let needle = &stage.args()[0];
                for line in drain(stage.input.as_ref()).lines() {
                    if line.contains(needle.as_str()) {
                        stage.output.write(format!("{}\n", line).as_bytes()).unwrap();
                    }
                }
            }
            "cat" => {
                let text = drain(stage.input.as_ref());
                stage.output.write(text.as_bytes()).unwrap();
            }
            other => panic!("unknown command {}", other),
        }
    }
}

#[test]
fn test_tokenizer_examples() {
    assert_eq!(tokenize("\"a b\" c").unwrap(), toks(&["a b", "c"]));
    assert_eq!(tokenize("a\\ b").unwrap(), toks(&["a b"]));
    assert!(matches!(
        tokenize("a\"b"),
        Err(ParseError::MalformedInput { .. })
    ));
}

#[test]
fn test_redirection_examples() {
    let (rest, spec) = extract_redirection(toks(&["cat", "f", ">", "out.txt"])).unwrap();
    assert_eq!(rest, toks(&["cat", "f"]));
    assert_eq!(spec, RedirectionSpec::Output("out.txt".to_string()));

    assert!(matches!(
        extract_redirection(toks(&["cat", "f", ">"])),
        Err(ParseError::MissingRedirectionTarget { .. })
    ));
}

#[test]
fn test_pipeline_example() {
    let input = memory();
    let output = memory();
    let stages = split_pipeline(
        toks(&["ls", "|", "grep", "foo"]),
        input,
        output.clone(),
    )
    .unwrap();

    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].tokens, toks(&["ls"]));
    assert_eq!(stages[1].tokens, toks(&["grep", "foo"]));

    stages[0].output.write(b"foo\nbar\n").unwrap();
    assert!(output.is_empty());
    assert_eq!(drain(stages[1].input.as_ref()), "foo\nbar\n");
}

#[test]
fn test_three_stage_pipeline_runs_in_order() {
    let frontend = ShellFrontend::from_config(&ShellConfig::default());
    let output = memory();
    let stages = frontend
        .submit("echo \"hello world\" | upper | grep HELLO", memory(), output.clone())
        .unwrap();

    assert_eq!(stages.len(), 3);
    run(&stages);
    assert_eq!(output.take_contents().unwrap(), b"HELLO WORLD\n");
}

#[test]
fn test_output_redirection_through_opener() {
    let opener = Arc::new(MemoryOpener::default());
    let frontend =
        ShellFrontend::from_config(&ShellConfig::default()).with_opener(opener.clone());
    let terminal = memory();

    let line = frontend
        .submit_line("echo saved > notes/today.txt", memory(), terminal.clone())
        .unwrap();
    assert!(line.redirection_applied);
    run(&line.stages);

    assert!(terminal.is_empty());
    let file = opener.file("notes/today.txt").expect("file opened");
    assert_eq!(file.take_contents().unwrap(), b"saved\n");
    assert_eq!(
        opener.opened.lock().as_slice(),
        &[("notes/today.txt".to_string(), RedirectMode::Output)]
    );
}

#[test]
fn test_append_keeps_existing_contents() {
    let opener = Arc::new(MemoryOpener::with_file("log", b"one\n"));
    let frontend =
        ShellFrontend::from_config(&ShellConfig::default()).with_opener(opener.clone());

    let stages = frontend.submit("echo two >> log", memory(), memory()).unwrap();
    run(&stages);

    let file = opener.file("log").unwrap();
    assert_eq!(file.take_contents().unwrap(), b"one\ntwo\n");
}

#[test]
fn test_input_redirection_feeds_first_stage() {
    let opener = Arc::new(MemoryOpener::with_file("words.txt", b"apple\nbanana\n"));
    let frontend =
        ShellFrontend::from_config(&ShellConfig::default()).with_opener(opener.clone());
    let output = memory();

    let stages = frontend
        .submit("cat | grep nan < words.txt", memory(), output.clone())
        .unwrap();
    run(&stages);

    assert_eq!(output.take_contents().unwrap(), b"banana\n");
}

#[test]
fn test_open_failure_is_reported() {
    let opener = Arc::new(MemoryOpener::default());
    let frontend = ShellFrontend::from_config(&ShellConfig::default()).with_opener(opener);

    let err = frontend
        .submit("cat < missing.txt", memory(), memory())
        .unwrap_err();
    assert!(matches!(err, ShellError::Open { ref path, .. } if path == "missing.txt"));
    assert!(!err.is_user_error());
}

#[test]
fn test_parse_errors_leave_frontend_usable() {
    let frontend = ShellFrontend::from_config(&ShellConfig::default());

    for bad in ["echo \"open", "ls | | wc", "ls |", "cat >", "cat < a > b"] {
        let err = frontend.submit(bad, memory(), memory()).unwrap_err();
        assert!(err.is_user_error(), "{} should be a user error", bad);
    }

    let output = memory();
    let stages = frontend.submit("echo ok", memory(), output.clone()).unwrap();
    run(&stages);
    assert_eq!(output.take_contents().unwrap(), b"ok\n");
}

#[test]
fn test_rejected_line_does_not_touch_opener() {
    let opener = Arc::new(MemoryOpener::default());
    let frontend =
        ShellFrontend::from_config(&ShellConfig::default()).with_opener(opener.clone());

    assert!(frontend.submit("ls | > out", memory(), memory()).is_err());
    assert!(opener.opened.lock().is_empty());
}

#[test]
fn test_custom_operators() {
    let config = ShellConfig {
        syntax: SyntaxConfig {
            pipe: "->".to_string(),
            output: "=>".to_string(),
            ..SyntaxConfig::default()
        },
        ..ShellConfig::default()
    };
    let frontend = ShellFrontend::from_config(&config);

    let line = frontend
        .submit_line("echo a | b -> upper => out", memory(), memory())
        .unwrap();
    assert_eq!(line.stages.len(), 2);
    assert_eq!(line.stages[0].tokens, toks(&["echo", "a", "|", "b"]));
    assert_eq!(line.redirection, RedirectionSpec::Output("out".to_string()));
}

#[test]
fn test_completions_follow_dispatcher() {
    let completions = Arc::new(StaticCompletions::new(toks(&["ls", "less"])));
    let frontend = ShellFrontend::new(&ShellConfig::default(), completions.clone());
    assert_eq!(frontend.complete("l").common_prefix, "l");

    completions.set(toks(&["ls", "less", "locate", "logout"]));
    let completion = frontend.complete("lo");
    assert_eq!(completion.matches, toks(&["locate", "logout"]));
    assert_eq!(completion.common_prefix, "lo");
}

#[test]
fn test_stage_streams_are_shared_not_copied() {
    let frontend = ShellFrontend::from_config(&ShellConfig::default());
    let input: SharedStream = memory();
    let stages = frontend.submit("a | b", input, memory()).unwrap();

    stages[0].output.write(b"x").unwrap();
    stages[1].input.close();
    assert!(stages[0].output.write(b"y").is_err());
}
