//! Browser wiring: thread-local game state, DOM listeners, interval timers and
//! the async wallet flows.
//!
//! State lives in a thread-local `RefCell` (same shape as a canvas game loop).
//! Wallet flows never hold the borrow across an `.await`: they copy what they
//! need out, await the provider, then borrow again to apply the result.

use std::cell::RefCell;

use log::{error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;

use crate::chain::{Eip1193, InjectedProvider, WalletClient};
use crate::config::Config;
use crate::error::WalletError;
use crate::game::{GameState, UpgradeKind};
use crate::ui::{Frame, View};

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

struct App {
    config: Config,
    game: GameState,
    view: View,
    wallet: Option<String>,
    on_chain_score: Option<u64>,
    is_recording: bool,
    // Present only while auto clickers > 0.
    auto_timer: Option<Interval>,
    _prune_timer: Interval,
}

impl App {
    fn render(&mut self) {
        let frame = Frame {
            game: &self.game,
            wallet: self.wallet.as_deref(),
            on_chain_score: self.on_chain_score,
            recording: self.is_recording,
        };
        if let Err(e) = self.view.render(&frame) {
            error!("render failed: {e:?}");
        }
    }

    fn buy(&mut self, kind: UpgradeKind) -> bool {
        if !self.game.buy_upgrade(kind) {
            return false;
        }
        if kind == UpgradeKind::AutoClicker {
            self.restart_auto_timer();
        }
        self.render();
        true
    }

    /// The auto-click period restarts whenever the clicker count changes.
    fn restart_auto_timer(&mut self) {
        self.auto_timer = None;
        if self.game.auto_clickers() == 0 {
            return;
        }
        match Interval::new(self.config.auto_tick_ms, || {
            with_app(|app| {
                app.game.auto_tick();
                app.render();
            });
        }) {
            Ok(timer) => self.auto_timer = Some(timer),
            Err(e) => error!("failed to start auto clicker timer: {e:?}"),
        }
    }
}

fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// `setInterval` handle that clears itself on drop.
struct Interval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    fn new(period_ms: i32, f: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let handle = win.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms,
        )?;
        Ok(Self { handle, _callback: callback })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(w) = window() {
            w.clear_interval_with_handle(self.handle);
        }
    }
}

pub fn start() -> Result<(), JsValue> {
    if APP.with(|cell| cell.borrow().is_some()) {
        warn!("game already started");
        return Ok(());
    }

    let config = Config::load_from_document();
    let level = config.level().unwrap_or(log::Level::Info);
    wasm_logger::init(wasm_logger::Config::new(level));

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let game = GameState::new(config.prices, config.lifetimes());
    let view = View::build(&doc, &game)?;
    attach_listeners(&view)?;

    let prune_timer = Interval::new(config.effect_prune_ms, || {
        with_app(|app| {
            if app.game.prune_effects(performance_now()) {
                app.render();
            }
        });
    })?;

    let app = App {
        config,
        game,
        view,
        wallet: None,
        on_chain_score: None,
        is_recording: false,
        auto_timer: None,
        _prune_timer: prune_timer,
    };
    APP.with(|cell| cell.replace(Some(app)));
    with_app(App::render);
    info!("ARC Clicker started");
    Ok(())
}

/// Buy an upgrade by name. False when the game is not running, the name is
/// unknown, or the score is short.
pub fn purchase(kind: &str) -> bool {
    UpgradeKind::parse(kind)
        .and_then(|kind| with_app(|app| app.buy(kind)))
        .unwrap_or(false)
}

pub fn score() -> u64 {
    with_app(|app| app.game.score()).unwrap_or(0)
}

fn attach_listeners(view: &View) -> Result<(), JsValue> {
    // Click target: score + effects at the pointer offset
    {
        let target = view.click_target.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let rect = target.get_bounding_client_rect();
            let x = evt.client_x() as f64 - rect.x();
            let y = evt.client_y() as f64 - rect.y();
            with_app(|app| {
                app.game.click(x, y, performance_now());
                app.render();
            });
        }) as Box<dyn FnMut(_)>);
        view.click_target
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    for (button, kind) in [
        (&view.buy_power_btn, UpgradeKind::ClickPower),
        (&view.buy_auto_btn, UpgradeKind::AutoClicker),
    ] {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_app(|app| app.buy(kind));
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            spawn_local(connect_wallet());
        }) as Box<dyn FnMut(_)>);
        view.connect_btn
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            spawn_local(record_score());
        }) as Box<dyn FnMut(_)>);
        view.record_btn
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn client_for(provider: InjectedProvider, config: &Config) -> WalletClient<InjectedProvider> {
    WalletClient::new(
        provider,
        config.chain.clone(),
        config.contract_address.clone(),
        config.gas_limit,
    )
}

async fn connect_wallet() {
    let Some(config) = with_app(|app| app.config.clone()) else {
        return;
    };
    let client = match InjectedProvider::detect() {
        Ok(provider) => client_for(provider, &config),
        Err(e) => {
            warn!("connect requested without a wallet: {e}");
            alert(&connect_failure_alert(&e));
            return;
        }
    };

    match client.connect().await {
        Ok(account) => {
            with_app(|app| {
                app.wallet = Some(account.clone());
                app.render();
            });
            refresh_on_chain_score(&client, &account).await;
        }
        Err(e) => {
            error!("wallet connection failed: {e}");
            alert(&connect_failure_alert(&e));
        }
    }
}

async fn refresh_on_chain_score<P: Eip1193>(client: &WalletClient<P>, account: &str) {
    match client.fetch_score(account).await {
        Ok(score) => {
            with_app(|app| {
                app.on_chain_score = Some(score);
                app.render();
            });
        }
        Err(e) => error!("failed to fetch on-chain score: {e}"),
    }
}

async fn record_score() {
    let Some((wallet, score, busy, config)) = with_app(|app| {
        (app.wallet.clone(), app.game.score(), app.is_recording, app.config.clone())
    }) else {
        return;
    };
    if busy {
        return;
    }

    match submit_score(wallet, score, &config).await {
        Ok((wallet, hash)) => {
            alert(&format!("Transaction sent! 🎉\nHash: {hash}"));
            schedule_score_refresh(wallet, config);
        }
        Err(e) => {
            error!("score submission failed: {e}");
            alert(&record_failure_alert(&e));
        }
    }
}

/// Returns the sending account and the transaction hash.
async fn submit_score(
    wallet: Option<String>,
    score: u64,
    config: &Config,
) -> Result<(String, String), WalletError> {
    let wallet = wallet.ok_or(WalletError::NotConnected)?;
    let client = client_for(InjectedProvider::detect()?, config);
    let hash = record_flagged(&client, &wallet, score, set_recording).await?;
    Ok((wallet, hash))
}

/// Holds the busy flag for the duration of the request, whatever the outcome.
async fn record_flagged<P: Eip1193>(
    client: &WalletClient<P>,
    from: &str,
    score: u64,
    mut set_busy: impl FnMut(bool),
) -> Result<String, WalletError> {
    set_busy(true);
    let result = client.record_score(from, score).await;
    set_busy(false);
    result
}

fn connect_failure_alert(err: &WalletError) -> String {
    match err {
        WalletError::NoWindow | WalletError::NoProvider => {
            "Please install MetaMask or another Web3 wallet!".to_string()
        }
        other => format!("Failed to connect wallet: {}", other.message()),
    }
}

fn record_failure_alert(err: &WalletError) -> String {
    match err {
        WalletError::NotConnected => "Please connect your wallet first!".to_string(),
        WalletError::NoWindow | WalletError::NoProvider => "Wallet not found!".to_string(),
        WalletError::WrongNetwork { .. } => "Please switch to ARC Testnet network first!".to_string(),
        other => format!("Transaction failed: {}", other.message()),
    }
}

fn set_recording(on: bool) {
    with_app(|app| {
        app.is_recording = on;
        app.render();
    });
}

/// Re-read the on-chain score once the transaction had time to land.
fn schedule_score_refresh(account: String, config: Config) {
    let Some(win) = window() else { return };
    let delay = config.score_refresh_delay_ms;
    let callback = Closure::once_into_js(move || {
        spawn_local(async move {
            match InjectedProvider::detect() {
                Ok(provider) => {
                    let client = client_for(provider, &config);
                    refresh_on_chain_score(&client, &account).await;
                }
                Err(e) => warn!("skipping score refresh: {e}"),
            }
        });
    });
    if let Err(e) =
        win.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
    {
        error!("failed to schedule score refresh: {e:?}");
    }
}

fn alert(message: &str) {
    if let Some(w) = window() {
        let _ = w.alert_with_message(message);
    }
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
