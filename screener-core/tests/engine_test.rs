//! End-to-end engine scenarios over CSV-shaped input.
//!
//! Each scenario feeds the engine a small table the way a sheet export
//! would deliver it (all text cells) and asserts on the annotated output.

use screener_core::{compute_actions, Cell, ScreenerConfig, Table};

const FULL_HEADER: &str = "ticker,name,sector,price,drawdown_from_52w_high,pass_fcf,pass_roic,\
pass_payout,pass_debt,pass_interest_cover,QUALITY_PASS,ENTRY_PERMITTED,BUY_CANDIDATE,score";

fn screen_csv(csv: &str, cfg: &ScreenerConfig) -> Table {
    let table = Table::from_csv_str(csv).unwrap();
    compute_actions(&table, cfg)
}

fn col(out: &Table, row: usize, name: &str) -> String {
    match out.cell(row, out.column_index(name).unwrap()) {
        Cell::Text(s) => s.clone(),
        Cell::Bool(b) => b.to_string(),
        Cell::Number(n) => n.to_string(),
        Cell::Null => String::new(),
    }
}

#[test]
fn quality_break_is_review_sell() {
    let csv = format!(
        "{FULL_HEADER}\nACME,Acme Corp,Industrials,42.0,-10,yes,yes,yes,yes,yes,no,yes,yes,80\n"
    );
    let out = screen_csv(&csv, &ScreenerConfig::default());
    assert_eq!(col(&out, 0, "ACTION"), "REVIEW SELL");
    assert_eq!(col(&out, 0, "REASON_SELL"), "QUALITY_PASS=FALSE");
    assert_eq!(col(&out, 0, "FAILED_CHECKS"), "QUALITY_PASS=FALSE");
    assert_eq!(col(&out, 0, "SELL_SIGNAL"), "true");
    assert_eq!(col(&out, 0, "BUY_SIGNAL"), "false");
}

#[test]
fn deep_drawdown_is_strong_buy() {
    let csv = format!(
        "{FULL_HEADER}\nACME,Acme Corp,Industrials,42.0,-35,yes,yes,yes,yes,yes,yes,yes,yes,80\n"
    );
    let out = screen_csv(&csv, &ScreenerConfig::default());
    assert_eq!(col(&out, 0, "ACTION"), "STRONG BUY");
    assert_eq!(col(&out, 0, "REASON_BUY"), "ENTRY_OK");
    assert_eq!(col(&out, 0, "BUY_SIGNAL"), "true");
}

#[test]
fn failed_required_check_sells_before_the_buy_path() {
    // pass_debt=false with the debt gate required: the shared
    // required-checks gate trips the sell review regardless of how
    // attractive the entry would be.
    let csv = format!(
        "{FULL_HEADER}\nACME,Acme Corp,Industrials,42.0,-35,yes,yes,yes,no,yes,yes,yes,yes,80\n"
    );
    let out = screen_csv(&csv, &ScreenerConfig::default());
    assert_eq!(col(&out, 0, "ACTION"), "REVIEW SELL");
    assert_eq!(col(&out, 0, "REASON_SELL"), "pass_debt");
    assert_eq!(col(&out, 0, "FAILED_CHECKS"), "pass_debt");
}

#[test]
fn entry_permitted_failing_flag_is_watch() {
    // pass_fcf failing but not required: no sell, no buy (low score and
    // no candidacy), present-and-false flag collected for watching.
    let csv = format!(
        "{FULL_HEADER}\nACME,Acme Corp,Industrials,42.0,-35,no,yes,yes,yes,yes,yes,yes,no,40\n"
    );
    let cfg = ScreenerConfig {
        require_pass_fcf: false,
        ..ScreenerConfig::default()
    };
    let out = screen_csv(&csv, &cfg);
    assert_eq!(col(&out, 0, "ACTION"), "WATCH");
    assert_eq!(col(&out, 0, "REASON_SELL"), "pass_fcf");
    assert_eq!(col(&out, 0, "FAILED_CHECKS"), "pass_fcf");
}

#[test]
fn no_evidence_no_requirements_is_hold() {
    let cfg = ScreenerConfig {
        require_pass_debt: false,
        require_pass_interest: false,
        require_pass_fcf: false,
        ..ScreenerConfig::default()
    };
    let out = screen_csv("ticker,QUALITY_PASS\nACME,yes\n", &cfg);
    assert_eq!(col(&out, 0, "ACTION"), "HOLD");
    assert_eq!(col(&out, 0, "REASON_BUY"), "");
    assert_eq!(col(&out, 0, "REASON_SELL"), "");
    assert_eq!(col(&out, 0, "FAILED_CHECKS"), "");
}

#[test]
fn shallow_drawdown_blocks_buy() {
    let csv = format!(
        "{FULL_HEADER}\nACME,Acme Corp,Industrials,42.0,-0.05,yes,yes,yes,yes,yes,yes,yes,yes,80\n"
    );
    let out = screen_csv(&csv, &ScreenerConfig::default());
    // Entry permitted and every flag passes, so nothing to watch either.
    assert_eq!(col(&out, 0, "ACTION"), "HOLD");
    assert_eq!(col(&out, 0, "BUY_SIGNAL"), "false");
}

#[test]
fn unrecognized_columns_pass_through_in_order() {
    let csv = "ticker,my_notes,QUALITY_PASS\nACME,keep me,yes\n";
    let cfg = ScreenerConfig {
        require_pass_debt: false,
        require_pass_interest: false,
        require_pass_fcf: false,
        ..ScreenerConfig::default()
    };
    let out = screen_csv(csv, &cfg);
    assert_eq!(col(&out, 0, "my_notes"), "keep me");
    assert_eq!(&out.headers()[..3], &["ticker", "my_notes", "QUALITY_PASS"]);
}

#[test]
fn mixed_locale_cells_normalize() {
    let csv = "ticker,drawdown_from_52w_high,score,QUALITY_PASS,ENTRY_PERMITTED,BUY_CANDIDATE,\
pass_debt,pass_interest_cover,pass_fcf\n\
 ACME , -25 ,\"72,5\",Sim,1,y,ok,true,YES\n";
    let out = screen_csv(csv, &ScreenerConfig::default());
    assert_eq!(col(&out, 0, "ticker"), "ACME");
    let dd = out.column_index("dd_norm").unwrap();
    assert_eq!(out.cell(0, dd), &Cell::Number(-0.25));
    let score = out.column_index("score").unwrap();
    assert_eq!(out.cell(0, score), &Cell::Number(72.5));
    assert_eq!(col(&out, 0, "ACTION"), "BUY");
}

#[test]
fn every_row_gets_exactly_one_known_action() {
    let csv = format!(
        "{FULL_HEADER}\n\
A,A,X,10,-35,yes,yes,yes,yes,yes,yes,yes,yes,90\n\
B,B,X,10,-5,yes,yes,yes,yes,yes,no,yes,yes,90\n\
C,C,X,10,,no,no,no,no,no,yes,no,no,\n\
D,D,X,10,-50,yes,yes,yes,yes,yes,yes,yes,no,10\n"
    );
    let out = screen_csv(&csv, &ScreenerConfig::default());
    let labels = [
        "STRONG BUY",
        "BUY",
        "SPECULATIVE / WATCH",
        "WATCH",
        "HOLD",
        "REVIEW SELL",
    ];
    assert_eq!(out.height(), 4);
    for i in 0..out.height() {
        let action = col(&out, i, "ACTION");
        assert!(labels.contains(&action.as_str()), "unknown action {action}");
    }
}

#[test]
fn buy_rows_sort_before_everything_else() {
    let csv = format!(
        "{FULL_HEADER}\n\
HOLD1,H,X,10,-5,yes,yes,yes,yes,yes,yes,yes,yes,10\n\
BUY1,B,X,10,-35,yes,yes,yes,yes,yes,yes,yes,yes,90\n\
SELL1,S,X,10,-35,yes,yes,yes,yes,yes,no,yes,yes,95\n\
BUY2,B,X,10,-35,yes,yes,yes,yes,yes,yes,yes,yes,60\n"
    );
    let out = screen_csv(&csv, &ScreenerConfig::default());
    let buy_idx = out.column_index("BUY_SIGNAL").unwrap();
    let mut seen_non_buy = false;
    for row in out.rows() {
        match row[buy_idx] {
            Cell::Bool(true) => assert!(!seen_non_buy, "buy row after non-buy row"),
            _ => seen_non_buy = true,
        }
    }
    assert_eq!(col(&out, 0, "ticker"), "BUY1"); // higher score first
    assert_eq!(col(&out, 1, "ticker"), "BUY2");
    assert_eq!(col(&out, 2, "ticker"), "SELL1");
    assert_eq!(col(&out, 3, "ticker"), "HOLD1");
}
