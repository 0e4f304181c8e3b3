//! Dispatch pipeline tests through the Bot facade
//!
//! Run with: cargo test -p integration-tests --test dispatch_tests

use std::sync::{Arc, Mutex};

use integration_tests::{button_interaction, slash_interaction, user_message};
use unicord::{Bot, BotConfig};

fn test_bot() -> Bot {
    let mut config = BotConfig::new("test-token");
    config.prefix = Some("!".to_string());
    Bot::new(config)
}

#[tokio::test]
async fn test_command_runs_inside_middleware_chain() {
    let mut bot = test_bot();
    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let mw_log = Arc::clone(&log);
    bot.middleware(move |ctx, next| {
        let log = Arc::clone(&mw_log);
        async move {
            log.lock().unwrap().push("before".to_string());
            let result = next.run(ctx).await;
            log.lock().unwrap().push("after".to_string());
            result
        }
    });

    let cmd_log = Arc::clone(&log);
    bot.command("greet", &["hello"], move |ctx| {
        let log = Arc::clone(&cmd_log);
        async move {
            log.lock().unwrap().push(format!("greet:{}", ctx.args.join(",")));
            Ok(())
        }
    });

    bot.handle_message(user_message("!greet there friend")).await;

    assert_eq!(
        *log.lock().unwrap(),
        vec!["before", "greet:there,friend", "after"]
    );
}

#[tokio::test]
async fn test_alias_reaches_the_same_handler() {
    let mut bot = test_bot();
    let count = Arc::new(Mutex::new(0u32));
    let recorder = Arc::clone(&count);
    bot.command("greet", &["hello"], move |_ctx| {
        let count = Arc::clone(&recorder);
        async move {
            *count.lock().unwrap() += 1;
            Ok(())
        }
    });

    bot.handle_message(user_message("!greet")).await;
    bot.handle_message(user_message("!HELLO")).await;

    assert_eq!(*count.lock().unwrap(), 2);
}

#[tokio::test]
async fn test_unknown_command_notifies_without_running_handlers() {
    let mut bot = test_bot();
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    bot.on_unknown_command(move |_ctx, name| {
        let seen = Arc::clone(&recorder);
        async move {
            seen.lock().unwrap().push(name);
            Ok(())
        }
    });

    bot.handle_message(user_message("!missing arg")).await;

    assert_eq!(*seen.lock().unwrap(), vec!["missing".to_string()]);
}

#[tokio::test]
async fn test_slash_and_button_routing() {
    let mut bot = test_bot();
    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let slash_log = Arc::clone(&log);
    bot.slash("ping", move |_ctx| {
        let log = Arc::clone(&slash_log);
        async move {
            log.lock().unwrap().push("slash".to_string());
            Ok(())
        }
    });
    let button_log = Arc::clone(&log);
    bot.button("confirm", move |_ctx| {
        let log = Arc::clone(&button_log);
        async move {
            log.lock().unwrap().push("button".to_string());
            Ok(())
        }
    });

    bot.handle_interaction(slash_interaction("ping")).await;
    bot.handle_interaction(button_interaction("confirm")).await;
    // unmatched interactions drop silently
    bot.handle_interaction(slash_interaction("ghost")).await;

    assert_eq!(*log.lock().unwrap(), vec!["slash", "button"]);
}

#[tokio::test]
async fn test_handler_error_reaches_error_subscriber() {
    let mut bot = test_bot();
    let errors: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&errors);
    bot.on_error(move |err| {
        recorder.lock().unwrap().push(err.to_string());
    });
    bot.command("explode", &[], |_ctx| async move {
        Err(anyhow::anyhow!("boom"))
    });

    bot.handle_message(user_message("!explode")).await;

    assert_eq!(*errors.lock().unwrap(), vec!["boom".to_string()]);
}

#[tokio::test]
async fn test_halting_middleware_blocks_commands() {
    let mut bot = test_bot();
    let ran = Arc::new(Mutex::new(false));

    bot.middleware(|_ctx, _next| async move { Ok(()) });
    let recorder = Arc::clone(&ran);
    bot.command("blocked", &[], move |_ctx| {
        let ran = Arc::clone(&recorder);
        async move {
            *ran.lock().unwrap() = true;
            Ok(())
        }
    });

    bot.handle_message(user_message("!blocked")).await;

    assert!(!*ran.lock().unwrap());
}
