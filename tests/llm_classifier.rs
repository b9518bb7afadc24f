use adcat::{build_category_prompt, classify_with_llm};

mod common;
use common::{FailingChat, ScriptedChat, block_on, capture_logs, sample_vocabulary};

fn names() -> Vec<String> {
    sample_vocabulary().names().to_vec()
}

#[test]
fn transport_failure_is_logged_and_yields_an_empty_selection() {
    let chat = FailingChat::Transport;
    let categories = names();

    let (selection, logs) = capture_logs(|| {
        block_on(classify_with_llm(
            "gaming laptops",
            &chat,
            "gpt-4o-mini",
            &categories,
            5,
        ))
    });

    assert!(selection.is_empty());
    assert!(logs.contains("chat completion failed"), "{logs}");
}

#[test]
fn http_error_status_is_logged_and_yields_an_empty_selection() {
    let chat = FailingChat::Status(503);
    let categories = names();

    let (selection, logs) = capture_logs(|| {
        block_on(classify_with_llm(
            "gaming laptops",
            &chat,
            "gpt-4o-mini",
            &categories,
            5,
        ))
    });

    assert!(selection.is_empty());
    assert!(logs.contains("chat completion failed"), "{logs}");
    assert!(logs.contains("503"), "{logs}");
}

#[test]
fn unparseable_content_is_logged_and_yields_an_empty_selection() {
    let chat = ScriptedChat::new("The campaign is about laptops.");
    let categories = names();

    let (selection, logs) = capture_logs(|| {
        block_on(classify_with_llm(
            "gaming laptops",
            &chat,
            "gpt-4o-mini",
            &categories,
            5,
        ))
    });

    assert!(selection.is_empty());
    assert!(logs.contains("could not parse"), "{logs}");
}

#[test]
fn well_formed_but_empty_selection_logs_a_warning() {
    let chat = ScriptedChat::selecting(&[]);
    let categories = names();

    let (selection, logs) = capture_logs(|| {
        block_on(classify_with_llm(
            "gaming laptops",
            &chat,
            "gpt-4o-mini",
            &categories,
            5,
        ))
    });

    assert!(selection.is_empty());
    assert!(logs.contains("empty category selection"), "{logs}");
}

#[test]
fn selection_keeps_model_order_and_truncates_to_the_limit() {
    let chat = ScriptedChat::selecting(&["Automotive", "Sports", "Technology"]);
    let categories = names();

    let selection = block_on(classify_with_llm(
        "sports cars",
        &chat,
        "gpt-4o-mini",
        &categories,
        2,
    ));

    assert_eq!(selection, ["Automotive", "Sports"]);
}

#[test]
fn out_of_vocabulary_answers_pass_through_verbatim() {
    let chat = ScriptedChat::selecting(&["Quantum Gardening"]);
    let categories = names();

    let selection = block_on(classify_with_llm(
        "weird text",
        &chat,
        "gpt-4o-mini",
        &categories,
        5,
    ));

    assert_eq!(selection, ["Quantum Gardening"]);
}

#[test]
fn the_prompt_enumerates_the_vocabulary_and_the_limit() {
    let categories = names();
    let prompt = build_category_prompt("gaming laptops", &categories, 4);

    assert!(prompt.contains("Sports, Technology, Automotive"));
    assert!(prompt.contains("select up to 4"));
    assert!(prompt.contains("gaming laptops"));
}

#[test]
fn the_backend_receives_the_rendered_prompt() {
    let chat = ScriptedChat::selecting(&["Technology"]);
    let categories = names();

    let selection = block_on(classify_with_llm(
        "buy laptops, gaming laptops, ultrabooks",
        &chat,
        "gpt-4o-mini",
        &categories,
        5,
    ));

    assert_eq!(selection, ["Technology"]);
    let prompts = chat.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("buy laptops, gaming laptops, ultrabooks"));
    assert!(prompts[0].contains("Sports, Technology, Automotive"));
}
