use td::output::{format_human, infer_command_name, HumanOutput};

#[test]
fn human_output_lists_sections_in_order() {
    let mut human = HumanOutput::new("Your list is now flushed of finished todos.");
    human.push_summary("removed", "0");
    human.push_warning("no finished todo to remove");
    human.push_next_step("td --all");

    let text = format_human(&human);
    let summary = text.find("Summary:").unwrap();
    let warnings = text.find("Warnings:").unwrap();
    let next = text.find("Next steps:").unwrap();

    assert!(text.starts_with("Your list is now flushed of finished todos."));
    assert!(summary < warnings && warnings < next);
    assert!(text.contains("- removed: 0"));
    assert!(text.contains("- td --all"));
}

#[test]
fn header_only_output_is_one_line() {
    let human = HumanOutput::new("Your list is now reordered.");
    assert_eq!(format_human(&human), "Your list is now reordered.");
}

#[test]
fn command_name_uses_alias_as_typed() {
    let args = ["-q", "sw", "1", "2"].map(String::from);
    assert_eq!(infer_command_name(args), "sw");

    let args = ["--config", "x.toml", "--done"].map(String::from);
    assert_eq!(infer_command_name(args), "list");
}
