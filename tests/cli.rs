use assert_cmd::Command;

fn argsplit() -> Command {
    let mut cmd = Command::cargo_bin("argsplit").unwrap();
    cmd.env_remove("ARGSPLIT_MAX_ARG_LEN").env_remove("ARGSPLIT_LOG");
    cmd
}

#[test]
fn prints_arguments() {
    argsplit()
        .args(["--print", "foo 'gideon juve' ${ARGSPLIT_TEST}x"])
        .env("ARGSPLIT_TEST", "val")
        .assert()
        .success()
        .stdout("ARG: 'foo'\nARG: 'gideon juve'\nARG: 'valx'\n");
}

#[test]
fn runs_the_command() {
    argsplit()
        .arg("sh -c 'echo \"$0-$1\"' a b")
        .assert()
        .success()
        .stdout("a-b\n");
}

#[test]
fn propagates_child_exit_code() {
    argsplit().arg("sh -c 'exit 7'").assert().code(7);
}

#[test]
fn missing_program_exits_127() {
    let assert = argsplit()
        .arg("argsplit-no-such-program --flag")
        .assert()
        .code(127);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("argsplit-no-such-program: command not found"));
}

#[test]
fn strict_rejects_unterminated_quote() {
    argsplit()
        .args(["--strict", "--print", "echo 'open"])
        .assert()
        .code(2)
        .stdout("");
}

#[test]
fn lenient_accepts_unterminated_quote() {
    argsplit()
        .args(["--print", "echo 'open"])
        .assert()
        .success()
        .stdout("ARG: 'echo'\nARG: 'open'\n");
}

#[test]
fn legacy_limit_overrides_max_arg_len_from_environment() {
    argsplit()
        .args(["--legacy-limit", "--print", "abcd"])
        .env("ARGSPLIT_MAX_ARG_LEN", "3")
        .assert()
        .success()
        .stdout("ARG: 'abcd'\n");
}

#[test]
fn max_arg_len_from_environment() {
    argsplit()
        .args(["--print", "abc abcd"])
        .env("ARGSPLIT_MAX_ARG_LEN", "3")
        .assert()
        .code(2);
}
