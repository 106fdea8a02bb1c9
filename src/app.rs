use gloo::timers::callback::Timeout;
use leptos::*;

use crate::{
    domain::{
        capture::{CaptureOptions, DEFAULT_PREFIX},
        logging::{LogComponent, get_time_provider},
        market_data::{CandleSeries, MockCandleGenerator, Price, TimeInterval, default_symbols},
        trading::{OrderSide, OrderType, TradeForm},
    },
    global_state::{capture_status, last_saved, theme},
    log_info,
    presentation::capture_to_file,
    time_utils::format_trade_date,
};

/// Element captured by the screenshot button.
pub const PORTFOLIO_PANEL_ID: &str = "portfolio-panel";
const STATUS_RESET_MS: u32 = 3_000;
const HISTORY_CANDLES: usize = 48;
const VISIBLE_CANDLES: usize = 12;
const SYMBOL_LIST_ID: &str = "watch-list";

/// State of the screenshot button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureStatus {
    #[default]
    Idle,
    Capturing,
    Saved(String),
    Failed(String),
}

impl CaptureStatus {
    pub fn label(&self) -> String {
        match self {
            CaptureStatus::Idle => "📸 Screenshot".to_string(),
            CaptureStatus::Capturing => "⏳ Capturing...".to_string(),
            CaptureStatus::Saved(name) => format!("✅ Saved {}", name),
            CaptureStatus::Failed(message) => format!("⚠️ {}", message),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, CaptureStatus::Capturing)
    }
}

/// Dashboard root
#[component]
pub fn App() -> impl IntoView {
    let theme = theme();
    let now = get_time_provider().current_timestamp();
    let interval = TimeInterval::OneHour;
    let start = now.saturating_sub(HISTORY_CANDLES as u64 * interval.duration_ms());
    let series: CandleSeries = MockCandleGenerator::new(7, 187.0, interval)
        .generate(HISTORY_CANDLES, start)
        .into_iter()
        .collect();
    let last_price = series.latest().map(|c| c.ohlcv.close).unwrap_or(Price::from(0.0));
    let range = series
        .price_range()
        .map(|(low, high)| format!(" • range ${:.2}–${:.2}", low.value(), high.value()))
        .unwrap_or_default();

    view! {
        <style>{DASHBOARD_CSS}</style>
        <div class="dashboard" style=move || theme.get().css_variables()>
            <header class="header">
                <div>
                    <h1>"Portfolio"</h1>
                    <p class="muted">
                        {format!("AAPL • last ${:.2}{}", last_price.value(), range)}
                    </p>
                </div>
                <div class="actions">
                    <ThemeToggle />
                    <ScreenshotButton target_id=PORTFOLIO_PANEL_ID prefix=DEFAULT_PREFIX />
                </div>
            </header>
            <main id=PORTFOLIO_PANEL_ID class="panel">
                <CandleTable series=series />
                <TradeTicket market_price=last_price />
            </main>
            <LastSaved />
        </div>
    }
}

/// Captures `target_id` and downloads it. The button marks itself with
/// `data-capture-ignore` so it never appears in its own screenshots.
#[component]
pub fn ScreenshotButton(
    #[prop(into)] target_id: String,
    #[prop(into, optional)] prefix: Option<String>,
) -> impl IntoView {
    let status = capture_status();
    let prefix = prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string());

    let on_click = move |_| {
        if status.get_untracked().is_busy() {
            return;
        }
        status.set(CaptureStatus::Capturing);
        let target_id = target_id.clone();
        let prefix = prefix.clone();
        // Saved images carry the on-screen background.
        let background = theme().get_untracked().capture_background();
        let options = CaptureOptions::default().with_background(background);

        spawn_local(async move {
            let next = match capture_to_file(&target_id, &prefix, &options).await {
                Ok(filename) => {
                    last_saved().set(Some(filename.to_string()));
                    CaptureStatus::Saved(filename.into())
                }
                Err(err) => CaptureStatus::Failed(err.to_string()),
            };
            status.set(next);
            Timeout::new(STATUS_RESET_MS, move || status.set(CaptureStatus::Idle)).forget();
        });
    };

    view! {
        <button
            class="screenshot-button"
            data-capture-ignore=""
            disabled=move || status.get().is_busy()
            on:click=on_click
        >
            {move || status.get().label()}
        </button>
    }
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = theme();
    view! {
        <button
            class="theme-toggle"
            data-capture-ignore=""
            on:click=move |_| theme.update(|t| *t = t.toggled())
        >
            {move || format!("Theme: {}", theme.get())}
        </button>
    }
}

/// Most recent candles of `series`, newest first.
#[component]
pub fn CandleTable(series: CandleSeries) -> impl IntoView {
    let total = series.count();
    let caption = format!("Last {} of {} candles", VISIBLE_CANDLES.min(total), total);
    let rows = series
        .get_candles()
        .iter()
        .rev()
        .take(VISIBLE_CANDLES)
        .map(|candle| {
            let class = if candle.is_bullish() { "up" } else { "down" };
            let ohlcv = candle.ohlcv;
            view! {
                <tr class=class>
                    <td>{format_trade_date(candle.timestamp.value())}</td>
                    <td>{format!("{:.2}", ohlcv.open.value())}</td>
                    <td>{format!("{:.2}", ohlcv.high.value())}</td>
                    <td>{format!("{:.2}", ohlcv.low.value())}</td>
                    <td>{format!("{:.2}", ohlcv.close.value())}</td>
                    <td>{format!("{:+.2}%", candle.change_percent())}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="candle-table">
            <caption class="muted">{caption}</caption>
            <thead>
                <tr>
                    <th>"Time (UTC)"</th>
                    <th>"Open"</th>
                    <th>"High"</th>
                    <th>"Low"</th>
                    <th>"Close"</th>
                    <th>"Change"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

/// Order entry. Validates locally and echoes the order; nothing is sent.
#[component]
pub fn TradeTicket(market_price: Price) -> impl IntoView {
    let symbols = default_symbols();
    let form = create_rw_signal(TradeForm {
        symbol: symbols.first().map(|s| s.to_string()).unwrap_or_default(),
        ..TradeForm::default()
    });
    let suggestions = symbols
        .into_iter()
        .map(|symbol| view! { <option value=symbol.to_string() /> })
        .collect_view();
    let feedback = create_rw_signal(None::<Result<String, String>>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let result = form.get_untracked().validate().map(|order| {
            log_info!(
                LogComponent::Presentation("TradeTicket"),
                "📝 order reviewed: {} {}",
                order.side,
                order.symbol
            );
            format!(
                "{} {} {} ({}) ≈ ${:.2}",
                order.side,
                order.quantity,
                order.symbol,
                order.order_type,
                order.notional(market_price)
            )
        });
        feedback.set(Some(result.map_err(|e| e.to_string())));
    };

    view! {
        <form class="trade-ticket" on:submit=on_submit>
            <h2>"Trade"</h2>
            <label>
                "Symbol"
                <input
                    type="text"
                    list=SYMBOL_LIST_ID
                    prop:value=move || form.get().symbol
                    on:input=move |ev| form.update(|f| f.symbol = event_target_value(&ev))
                />
                <datalist id=SYMBOL_LIST_ID>{suggestions}</datalist>
            </label>
            <label>
                "Side"
                <select on:change=move |ev| {
                    if let Ok(side) = event_target_value(&ev).parse::<OrderSide>() {
                        form.update(|f| f.side = side);
                    }
                }>
                    <option value="buy">"Buy"</option>
                    <option value="sell">"Sell"</option>
                </select>
            </label>
            <label>
                "Type"
                <select on:change=move |ev| {
                    if let Ok(order_type) = event_target_value(&ev).parse::<OrderType>() {
                        form.update(|f| f.order_type = order_type);
                    }
                }>
                    <option value="market">"Market"</option>
                    <option value="limit">"Limit"</option>
                </select>
            </label>
            <label>
                "Quantity"
                <input
                    type="text"
                    inputmode="decimal"
                    prop:value=move || form.get().quantity
                    on:input=move |ev| form.update(|f| f.quantity = event_target_value(&ev))
                />
            </label>
            <label>
                "Limit price"
                <input
                    type="text"
                    inputmode="decimal"
                    prop:disabled=move || form.get().order_type == OrderType::Market
                    prop:value=move || form.get().limit_price
                    on:input=move |ev| form.update(|f| f.limit_price = event_target_value(&ev))
                />
            </label>
            <button type="submit">"Review order"</button>
            {move || feedback.get().map(|result| match result {
                Ok(message) => view! { <p class="feedback ok">{message}</p> },
                Err(message) => view! { <p class="feedback error">{message}</p> },
            })}
        </form>
    }
}

#[component]
fn LastSaved() -> impl IntoView {
    let last_saved = last_saved();
    view! {
        <footer class="muted">
            {move || last_saved.get().map(|name| format!("Last screenshot: {}", name))}
        </footer>
    }
}

/// Kept next to the components so the capture sees the same computed
/// styles the user does.
const DASHBOARD_CSS: &str = r#"
.dashboard {
    min-height: 100vh;
    padding: 24px;
    background: var(--bg);
    color: var(--text);
    font-family: 'Inter', 'Segoe UI', sans-serif;
}
.header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 16px;
}
.header h1 { margin: 0; font-size: 22px; }
.muted { color: var(--text-muted); font-size: 13px; }
.actions { display: flex; gap: 8px; }
.actions button, .trade-ticket button {
    background: var(--accent);
    color: #ffffff;
    border: none;
    border-radius: 6px;
    padding: 8px 14px;
    cursor: pointer;
}
.actions button:disabled { opacity: 0.6; cursor: progress; }
.panel {
    display: grid;
    grid-template-columns: 2fr 1fr;
    gap: 16px;
    padding: 16px;
    background: var(--panel);
    border: 1px solid var(--border);
    border-radius: 10px;
    overflow: auto;
}
.candle-table { width: 100%; border-collapse: collapse; font-size: 13px; }
.candle-table th, .candle-table td {
    padding: 6px 8px;
    text-align: right;
    border-bottom: 1px solid var(--border);
}
.candle-table th:first-child, .candle-table td:first-child { text-align: left; }
.candle-table tr.up td:last-child { color: var(--positive); }
.candle-table tr.down td:last-child { color: var(--negative); }
.trade-ticket { display: flex; flex-direction: column; gap: 10px; }
.trade-ticket h2 { margin: 0; font-size: 16px; }
.trade-ticket label { display: flex; flex-direction: column; gap: 4px; font-size: 12px; }
.trade-ticket input, .trade-ticket select {
    padding: 6px 8px;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--text);
}
.feedback { font-size: 13px; margin: 0; }
.feedback.ok { color: var(--positive); }
.feedback.error { color: var(--negative); }
"#;
