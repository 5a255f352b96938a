mod support;

use predicates::str::contains;

use support::td_cmd;

#[test]
fn td_help_works() {
    td_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Your todos manager"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "init", "add", "modify", "toggle", "wip", "clean", "reorder", "swap", "search",
    ];

    for cmd in subcommands {
        td_cmd().arg(cmd).arg("--help").assert().success();
    }
}

#[test]
fn usage_errors_exit_with_one() {
    td_cmd().arg("swap").arg("1").assert().code(1);
    td_cmd().args(["toggle", "abc"]).assert().code(1);
}
