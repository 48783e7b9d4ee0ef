//! DOM presentation for the clicker card.
//!
//! The view is built once under `#arc-clicker` (created in `<body>` when the
//! page does not provide it) and then patched in place on every state change.
//! Every structural element carries an `arc-*` id, so host markup that already
//! provides one is reused rather than replaced.
//! Click effects are synced by id so running CSS animations are not restarted.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use crate::chain::short_address;
use crate::game::{Effects, GameState, UpgradeKind};

pub const MOUNT_ID: &str = "arc-clicker";
const STYLE_ID: &str = "arc-clicker-style";
const STAR_COUNT: usize = 50;

const STYLESHEET: &str = r#"
#arc-clicker { position:fixed; inset:0; display:flex; align-items:center; justify-content:center; padding:16px; overflow:hidden; font-family:system-ui, sans-serif; background:linear-gradient(135deg,#581c87,#1e3a8a,#312e81); }
#arc-clicker [hidden] { display:none !important; }
#arc-clicker button { border:none; cursor:pointer; font-weight:700; transition:transform .15s, filter .15s; }
#arc-clicker button:hover:not(:disabled) { transform:scale(1.04); filter:brightness(1.1); }
#arc-clicker button:disabled { opacity:.5; cursor:not-allowed; }
.arc-stars { position:absolute; inset:0; pointer-events:none; overflow:hidden; }
.arc-star { position:absolute; color:#fef08a; opacity:.2; animation:arc-pulse 2s ease-in-out infinite; }
.arc-card { position:relative; z-index:10; width:100%; max-width:28rem; }
.arc-header { background:linear-gradient(90deg,#ec4899,#a855f7,#6366f1); border-radius:24px 24px 0 0; padding:24px; box-shadow:0 25px 50px rgba(0,0,0,.25); }
.arc-title { margin:0 0 16px; color:#fff; font-size:36px; text-align:center; }
.arc-connect { width:100%; background:#fff; color:#7e22ce; padding:12px 24px; border-radius:12px; font-size:16px; }
.arc-wallet { text-align:center; }
.arc-address { color:#fff; font-size:14px; margin:0 0 8px; }
.arc-onchain { color:#fde047; font-size:12px; margin:0; }
.arc-body { background:#fff; border-radius:0 0 24px 24px; padding:32px; box-shadow:0 25px 50px rgba(0,0,0,.25); }
.arc-score { font-size:60px; font-weight:700; text-align:center; color:#9333ea; animation:arc-pulse 2s ease-in-out infinite; }
.arc-caption { text-align:center; color:#4b5563; font-size:14px; margin:0 0 32px; }
.arc-target { position:relative; display:block; width:100%; aspect-ratio:1; border-radius:50%; margin-bottom:32px; overflow:hidden; background:linear-gradient(135deg,#f472b6,#a855f7,#4f46e5); box-shadow:0 20px 60px rgba(168,85,247,.4); }
.arc-target:active { transform:scale(.95); }
.arc-bolt { position:absolute; inset:0; display:flex; align-items:center; justify-content:center; font-size:80px; color:#fff; pointer-events:none; }
.arc-fx { position:absolute; inset:0; pointer-events:none; }
.arc-particle { position:absolute; color:#fde047; font-weight:700; font-size:24px; transform:translate(-50%,-50%); animation:arc-ping 1s cubic-bezier(0,0,.2,1) forwards; }
.arc-ripple { position:absolute; border:4px solid #fff; border-radius:50%; transform:translate(-50%,-50%); animation:arc-ripple .6s ease-out forwards; }
.arc-stats { display:grid; grid-template-columns:1fr 1fr; gap:16px; margin-bottom:24px; }
.arc-stat { border-radius:12px; padding:16px; text-align:center; background:linear-gradient(135deg,#f3e8ff,#fce7f3); }
.arc-stat-value { font-size:24px; font-weight:700; color:#7e22ce; }
.arc-stat-label { font-size:12px; color:#4b5563; }
.arc-buy { display:block; width:100%; color:#fff; padding:12px 16px; border-radius:12px; margin-bottom:12px; font-size:15px; background:linear-gradient(90deg,#a855f7,#ec4899); }
.arc-buy-auto { background:linear-gradient(90deg,#3b82f6,#6366f1); }
.arc-record { display:block; width:100%; color:#fff; padding:16px 24px; border-radius:12px; margin-top:12px; font-size:16px; background:linear-gradient(90deg,#22c55e,#059669); }
@keyframes arc-ripple { 0% { width:0; height:0; opacity:1; } 100% { width:200px; height:200px; opacity:0; } }
@keyframes arc-ping { 0% { opacity:1; transform:translate(-50%,-50%) scale(1); } 100% { opacity:0; transform:translate(-50%,-150%) scale(1.6); } }
@keyframes arc-pulse { 50% { opacity:.55; } }
"#;

/// Everything the view needs for one render.
pub struct Frame<'a> {
    pub game: &'a GameState,
    pub wallet: Option<&'a str>,
    pub on_chain_score: Option<u64>,
    pub recording: bool,
}

pub struct View {
    doc: Document,
    pub connect_btn: HtmlButtonElement,
    pub wallet_panel: HtmlElement,
    pub address_el: Element,
    pub onchain_el: HtmlElement,
    pub score_el: Element,
    pub click_target: HtmlButtonElement,
    pub fx_layer: Element,
    pub power_el: Element,
    pub auto_el: Element,
    pub buy_power_btn: HtmlButtonElement,
    pub buy_auto_btn: HtmlButtonElement,
    pub record_btn: HtmlButtonElement,
    // Effect ids currently in the DOM.
    rendered_fx: Vec<(u64, Element)>,
}

impl View {
    /// Elements the page already carries (matched by id) are adopted in
    /// place; anything missing is created.
    pub fn build(doc: &Document, game: &GameState) -> Result<Self, JsValue> {
        let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
        if doc.get_element_by_id(STYLE_ID).is_none() {
            let style = doc.create_element("style")?;
            style.set_id(STYLE_ID);
            style.set_text_content(Some(STYLESHEET));
            body.append_child(&style)?;
        }

        let (mount, _) = ensure(doc, &body, "div", MOUNT_ID, "")?;

        let (stars, fresh) = ensure(doc, &mount, "div", "arc-stars", "arc-stars")?;
        if fresh {
            for _ in 0..STAR_COUNT {
                let star = child(doc, &stars, "span", "arc-star")?;
                star.set_text_content(Some("★"));
                star.set_attribute(
                    "style",
                    &format!(
                        "left:{:.2}%; top:{:.2}%; animation-delay:{:.2}s; font-size:{:.0}px;",
                        random_unit() * 100.0,
                        random_unit() * 100.0,
                        random_unit() * 3.0,
                        random_unit() * 20.0 + 10.0
                    ),
                )?;
            }
        }

        let (card, _) = ensure(doc, &mount, "div", "arc-card", "arc-card")?;

        let (header, _) = ensure(doc, &card, "div", "arc-header", "arc-header")?;
        let (title, fresh) = ensure(doc, &header, "h1", "arc-title", "arc-title")?;
        if fresh {
            title.set_text_content(Some("⚡ ARC Clicker"));
        }
        let connect_btn: HtmlButtonElement =
            ensure(doc, &header, "button", "arc-connect", "arc-connect")?.0.dyn_into()?;
        connect_btn.set_text_content(Some("👛 Connect Wallet"));
        let wallet_panel: HtmlElement =
            ensure(doc, &header, "div", "arc-wallet", "arc-wallet")?.0.dyn_into()?;
        let (address_el, _) = ensure(doc, &wallet_panel, "p", "arc-address", "arc-address")?;
        let onchain_el: HtmlElement =
            ensure(doc, &wallet_panel, "p", "arc-onchain", "arc-onchain")?.0.dyn_into()?;

        let (panel, _) = ensure(doc, &card, "div", "arc-body", "arc-body")?;
        let (score_el, _) = ensure(doc, &panel, "div", "arc-score", "arc-score")?;
        let (caption, fresh) = ensure(doc, &panel, "p", "arc-caption", "arc-caption")?;
        if fresh {
            caption.set_text_content(Some("Total Clicks"));
        }

        let (target, fresh) = ensure(doc, &panel, "button", "arc-target", "arc-target")?;
        if fresh {
            child(doc, &target, "span", "arc-bolt")?.set_text_content(Some("⚡"));
        }
        let click_target: HtmlButtonElement = target.dyn_into()?;
        let (fx_layer, _) = ensure(doc, &click_target, "div", "arc-fx", "arc-fx")?;
        // Effects left by an earlier view are not tracked.
        fx_layer.set_inner_html("");

        let (stats, _) = ensure(doc, &panel, "div", "arc-stats", "arc-stats")?;
        let power_el = stat_tile(doc, &stats, "arc-power", "Click Power")?;
        let auto_el = stat_tile(doc, &stats, "arc-auto", "Auto/sec")?;

        let prices = game.prices();
        let buy_power_btn: HtmlButtonElement =
            ensure(doc, &panel, "button", "arc-buy-power", "arc-buy")?.0.dyn_into()?;
        buy_power_btn.set_text_content(Some(&upgrade_label(
            UpgradeKind::ClickPower,
            prices.cost(UpgradeKind::ClickPower),
        )));
        let buy_auto_btn: HtmlButtonElement =
            ensure(doc, &panel, "button", "arc-buy-auto", "arc-buy arc-buy-auto")?.0.dyn_into()?;
        buy_auto_btn.set_text_content(Some(&upgrade_label(
            UpgradeKind::AutoClicker,
            prices.cost(UpgradeKind::AutoClicker),
        )));
        let record_btn: HtmlButtonElement =
            ensure(doc, &panel, "button", "arc-record", "arc-record")?.0.dyn_into()?;

        Ok(Self {
            doc: doc.clone(),
            connect_btn,
            wallet_panel,
            address_el,
            onchain_el,
            score_el,
            click_target,
            fx_layer,
            power_el,
            auto_el,
            buy_power_btn,
            buy_auto_btn,
            record_btn,
            rendered_fx: Vec::new(),
        })
    }

    pub fn render(&mut self, frame: &Frame<'_>) -> Result<(), JsValue> {
        let game = frame.game;
        self.score_el.set_text_content(Some(&format_thousands(game.score())));
        self.power_el.set_text_content(Some(&game.click_power().to_string()));
        self.auto_el.set_text_content(Some(&game.auto_clickers().to_string()));
        self.buy_power_btn.set_disabled(!game.can_afford(UpgradeKind::ClickPower));
        self.buy_auto_btn.set_disabled(!game.can_afford(UpgradeKind::AutoClicker));

        match frame.wallet {
            Some(addr) => {
                self.connect_btn.set_hidden(true);
                self.wallet_panel.set_hidden(false);
                self.address_el.set_text_content(Some(&short_address(addr)));
                match frame.on_chain_score {
                    Some(score) => {
                        self.onchain_el.set_hidden(false);
                        self.onchain_el.set_text_content(Some(&format!("🏆 On-chain: {score}")));
                    }
                    None => self.onchain_el.set_hidden(true),
                }
                self.record_btn.set_hidden(false);
                self.record_btn.set_disabled(frame.recording);
                self.record_btn.set_text_content(Some(record_label(frame.recording)));
            }
            None => {
                self.connect_btn.set_hidden(false);
                self.wallet_panel.set_hidden(true);
                self.record_btn.set_hidden(true);
            }
        }

        self.sync_effects(game.effects())
    }

    fn sync_effects(&mut self, effects: &Effects) -> Result<(), JsValue> {
        let live: Vec<u64> = effects
            .particles()
            .iter()
            .map(|p| p.id)
            .chain(effects.ripples().iter().map(|r| r.id))
            .collect();
        self.rendered_fx.retain(|(id, el)| {
            let keep = live.contains(id);
            if !keep {
                el.remove();
            }
            keep
        });

        for p in effects.particles() {
            if self.is_rendered(p.id) {
                continue;
            }
            let el = child(&self.doc, &self.fx_layer, "div", "arc-particle")?;
            el.set_attribute("style", &position_style(p.x, p.y))?;
            el.set_text_content(Some(&format!("+{}", p.value)));
            self.rendered_fx.push((p.id, el));
        }
        for r in effects.ripples() {
            if self.is_rendered(r.id) {
                continue;
            }
            let el = child(&self.doc, &self.fx_layer, "div", "arc-ripple")?;
            el.set_attribute("style", &position_style(r.x, r.y))?;
            self.rendered_fx.push((r.id, el));
        }
        Ok(())
    }

    fn is_rendered(&self, id: u64) -> bool {
        self.rendered_fx.iter().any(|(rid, _)| *rid == id)
    }
}

fn child(doc: &Document, parent: &Element, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    el.set_class_name(class);
    parent.append_child(&el)?;
    Ok(el)
}

/// Element with `id`, created under `parent` when the document lacks it.
/// The flag is true for a fresh element.
fn ensure(
    doc: &Document,
    parent: &Element,
    tag: &str,
    id: &str,
    class: &str,
) -> Result<(Element, bool), JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok((el, false));
    }
    let el = child(doc, parent, tag, class)?;
    el.set_id(id);
    Ok((el, true))
}

// Returns the value element of a two-line stat tile.
fn stat_tile(doc: &Document, parent: &Element, id: &str, label: &str) -> Result<Element, JsValue> {
    let (tile, fresh) = ensure(doc, parent, "div", &format!("{id}-tile"), "arc-stat")?;
    let (value, _) = ensure(doc, &tile, "div", id, "arc-stat-value")?;
    if fresh {
        child(doc, &tile, "div", "arc-stat-label")?.set_text_content(Some(label));
    }
    Ok(value)
}

fn position_style(x: f64, y: f64) -> String {
    format!("left:{x:.1}px; top:{y:.1}px;")
}

pub fn upgrade_label(kind: UpgradeKind, cost: u64) -> String {
    format!("{} (Cost: {})", kind.label(), format_thousands(cost))
}

pub fn record_label(recording: bool) -> &'static str {
    if recording { "Recording..." } else { "🏆 Record Score On-Chain" }
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn random_unit() -> f64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 4];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u32::from_le_bytes(buf) as f64 / (u32::MAX as f64 + 1.0);
        }
    }
    js_sys::Math::random()
}
