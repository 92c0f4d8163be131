use companion::kernel::intent::{classify, Classifier, IntentKind, SlotDefaults, RULES};

#[test]
fn test_weather_always_wins() {
    let utterances = [
        "weather",
        "tell me a joke about the weather",
        "what is the weather in rome",
        "remind me to check the weather",
        "note the weather is 20 degrees",
        "hello weather help",
    ];
    for u in utterances {
        assert_eq!(classify(u).intent, IntentKind::Weather, "{:?} must classify as Weather", u);
    }
}

#[test]
fn test_weather_city_slot() {
    assert_eq!(classify("weather in Paris").slot, "Paris");
    assert_eq!(classify("weather London").slot, "London");
    assert_eq!(classify("weather").slot, SlotDefaults::default().city);

    let custom = Classifier::new(SlotDefaults {
        city: "oslo".to_string(),
        topic: "rust".to_string(),
    });
    assert_eq!(custom.classify("how is the weather").slot, "oslo");
}

#[test]
fn test_empty_utterance_is_unknown() {
    let c = classify("");
    assert_eq!(c.intent, IntentKind::Unknown);
    assert!(c.slot.is_empty());
}

#[test]
fn test_rule_order_is_fixed() {
    let order: Vec<IntentKind> = RULES.iter().map(|r| r.intent).collect();
    assert_eq!(
        order,
        vec![
            IntentKind::Weather,
            IntentKind::Quote,
            IntentKind::Joke,
            IntentKind::Encyclopedia,
            IntentKind::AddTask,
            IntentKind::AddNote,
            IntentKind::Calculate,
            IntentKind::Greeting,
            IntentKind::Help,
        ]
    );
}

#[test]
fn test_task_beats_note() {
    let c = classify("remind me to remember the milk");
    assert_eq!(c.intent, IntentKind::AddTask);
    assert_eq!(c.slot, "remember the milk");
}

#[test]
fn test_note_beats_calculation() {
    let c = classify("note that the door code is 4521");
    assert_eq!(c.intent, IntentKind::AddNote);
    assert_eq!(c.slot, "that the door code is 4521");
}

#[test]
fn test_task_slot_stripping() {
    assert_eq!(classify("add task buy milk").slot, "buy milk");
    assert_eq!(classify("remind me to add sugar").slot, "sugar");
    assert_eq!(classify("todo").slot, "");
    assert_eq!(classify("todo").intent, IntentKind::AddTask);
}

#[test]
fn test_note_slot_stripping() {
    let c = classify("save that the meeting moved to friday");
    assert_eq!(c.intent, IntentKind::AddNote);
    assert_eq!(c.slot, "the meeting moved to friday");
    assert_eq!(classify("remember").slot, "");
}

#[test]
fn test_encyclopedia_topic() {
    let c = classify("tell me about black holes");
    assert_eq!(c.intent, IntentKind::Encyclopedia);
    assert_eq!(c.slot, "black holes");

    assert_eq!(classify("wiki rust what is").slot, "rust");
    assert_eq!(classify("what is").slot, "artificial intelligence");
}

#[test]
fn test_quote_and_joke() {
    assert_eq!(classify("give me some inspiration").intent, IntentKind::Quote);
    assert_eq!(classify("say something funny").intent, IntentKind::Joke);
    assert!(classify("a quote please").slot.is_empty());
}

#[test]
fn test_calculation_slot() {
    let c = classify("calculate 25 plus 17");
    assert_eq!(c.intent, IntentKind::Calculate);
    assert_eq!(c.slot, "25+17");

    assert_eq!(classify("12 times 3").slot, "12*3");
    assert_eq!(classify("100 divided by 4 minus 5").slot, "100/4-5");
    assert_eq!(classify("6 multiplied by (2 + 1)").slot, "6*(2+1)");

    let bare = classify("do some math");
    assert_eq!(bare.intent, IntentKind::Calculate);
    assert_eq!(bare.slot, "");
}

#[test]
fn test_greeting_help_unknown() {
    assert_eq!(classify("hey there").intent, IntentKind::Greeting);
    // "hi" is matched as a substring.
    assert_eq!(classify("nothing much").intent, IntentKind::Greeting);
    assert_eq!(classify("what can you do").intent, IntentKind::Help);
    assert_eq!(classify("good morning").intent, IntentKind::Unknown);
}

#[test]
fn test_predicates_ignore_case_but_slots_keep_it() {
    let c = classify("Tell Me About Ada Lovelace");
    assert_eq!(c.intent, IntentKind::Encyclopedia);
    assert_eq!(c.slot, "Ada Lovelace");
}
