// Browser smoke tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use bucket_drop::{GameConfig, Outcome, Phase, web};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn press(key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    let evt = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    doc.dispatch_event(&evt).unwrap();
}

// One test: the session is a per-thread singleton shared by the whole wasm instance.
#[wasm_bindgen_test]
async fn round_runs_out_and_enter_restarts() {
    let cfg = GameConfig { time_limit_secs: 1, intro_delay_ms: 0, ..GameConfig::default() };
    web::launch(cfg).expect("first start");
    let doc = web_sys::window().unwrap().document().unwrap();
    assert!(doc.get_element_by_id("gameCanvas").is_some());
    for i in 1..=4 {
        let el = doc.get_element_by_id(&format!("bucket{i}")).unwrap();
        assert_eq!(el.text_content().as_deref(), Some("0"));
    }
    assert!(doc.get_element_by_id("timeBar").is_some());
    assert!(doc.get_element_by_id("intro").is_some());
    assert!(bucket_drop::start_game().is_err());

    // Enter does nothing before the round is over
    assert_eq!(web::phase(), Some(Phase::Intro));
    press("Enter");
    assert_eq!(web::phase(), Some(Phase::Intro));

    sleep_ms(1600).await;
    assert_eq!(web::phase(), Some(Phase::Ended(Outcome::Loss)));
    press("ArrowLeft");
    assert_eq!(web::phase(), Some(Phase::Ended(Outcome::Loss)));

    press("Enter");
    assert_eq!(web::phase(), Some(Phase::Playing));
    sleep_ms(100).await;
    assert_eq!(web::phase(), Some(Phase::Playing));
}
