use regex_strategy::{from_regex, strategy::Drawer, Flags, Pattern};

fn main() {
    let strategy = from_regex(r"(?P<user>[a-z]{3,8})@(?:example|test)\.(?:com|org)").unwrap();
    let mut drawer = Drawer::seeded(0);
    for s in drawer.samples(&strategy).take(5) {
        println!("{}", s.unwrap());
    }

    // Back references repeat the same text
    let strategy = from_regex(r#"<([a-z]+)>[^<]*</\1>"#).unwrap();
    let s = drawer.draw(&strategy).unwrap();
    println!("{s}");

    let pattern = Pattern::with_flags(r"\w+ \d+", Flags::ASCII_ONLY | Flags::CASE_INSENSITIVE).unwrap();
    let strategy = from_regex(&pattern).unwrap();
    let s = drawer
        .find(&strategy, |s| s.chars().any(|c| c.is_ascii_uppercase()))
        .unwrap();
    assert!(pattern.is_match(&s));
    println!("{s}");

    // Drawing from entropy gives different examples on every run
    let strategy = from_regex(r"#[0-9a-f]{6}").unwrap();
    println!("{}", Drawer::from_entropy().draw(&strategy).unwrap());
}
