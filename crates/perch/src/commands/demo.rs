/// Replays the built-in demo script with default settings.
///
/// The user's config is ignored so the output is the same everywhere.
pub fn execute(json: bool) {
    let script = match perch_sim::demo_script() {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Error: built-in demo script is invalid: {e}");
            std::process::exit(1);
        }
    };
    if !json {
        println!("Replaying the built-in demo ({} steps)\n", script.steps.len());
    }
    super::replay_and_print(perch_core::Config::default(), &script, json);
}
