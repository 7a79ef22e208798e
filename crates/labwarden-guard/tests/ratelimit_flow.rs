//! Rate limiter window, violation, and block behavior.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::{Duration, Instant};

use labwarden_guard::config::schema::LimitsSection;
use labwarden_guard::ratelimit::{RateLimiter, Verdict, CLASS_AUTH, CLASS_DEFAULT};

fn limiter() -> RateLimiter {
    RateLimiter::new(&LimitsSection::default())
}

#[test]
fn default_window_admits_then_denies() {
    let rl = limiter();
    let base = Instant::now();

    for i in 0..5u64 {
        let at = base + Duration::from_secs(i);
        assert_eq!(rl.check_at("u1", CLASS_DEFAULT, at), Verdict::Admitted);
    }
    assert_eq!(
        rl.check_at("u1", CLASS_DEFAULT, base + Duration::from_secs(5)),
        Verdict::Denied { retry_after_secs: 60 }
    );
    assert!(!rl.is_blocked("u1"));
}

#[test]
fn third_violation_blocks() {
    let rl = limiter();
    let base = Instant::now();

    for i in 0..5u64 {
        rl.check_at("u2", CLASS_DEFAULT, base + Duration::from_secs(i));
    }

    // Exceed the window three times: Denied, Denied, Blocked.
    assert!(matches!(
        rl.check_at("u2", CLASS_DEFAULT, base + Duration::from_secs(10)),
        Verdict::Denied { .. }
    ));
    assert!(matches!(
        rl.check_at("u2", CLASS_DEFAULT, base + Duration::from_secs(11)),
        Verdict::Denied { .. }
    ));
    assert_eq!(
        rl.check_at("u2", CLASS_DEFAULT, base + Duration::from_secs(12)),
        Verdict::Blocked
    );
    assert!(rl.is_blocked("u2"));
    assert_eq!(rl.blocked_count(), 1);

    // Once blocked, every class is blocked, even far in the future.
    assert_eq!(
        rl.check_at("u2", CLASS_AUTH, base + Duration::from_secs(9_999)),
        Verdict::Blocked
    );
}

#[test]
fn violations_accumulate_across_classes() {
    let rl = limiter();
    let base = Instant::now();

    for i in 0..5u64 {
        rl.check_at("u3", CLASS_DEFAULT, base + Duration::from_secs(i));
    }
    for i in 0..3u64 {
        rl.check_at("u3", CLASS_AUTH, base + Duration::from_secs(i));
    }

    // The counter is per caller, not per class: two exceeds on default plus
    // one on auth reach the threshold.
    assert!(matches!(
        rl.check_at("u3", CLASS_DEFAULT, base + Duration::from_secs(10)),
        Verdict::Denied { .. }
    ));
    assert!(matches!(
        rl.check_at("u3", CLASS_AUTH, base + Duration::from_secs(11)),
        Verdict::Denied { .. }
    ));
    assert_eq!(
        rl.check_at("u3", CLASS_DEFAULT, base + Duration::from_secs(12)),
        Verdict::Blocked
    );
}

#[test]
fn window_expiry_readmits() {
    let rl = limiter();
    let base = Instant::now();

    for i in 0..5u64 {
        rl.check_at("u4", CLASS_DEFAULT, base + Duration::from_secs(i));
    }
    assert!(matches!(
        rl.check_at("u4", CLASS_DEFAULT, base + Duration::from_secs(30)),
        Verdict::Denied { .. }
    ));

    // 61s after the first attempt the whole window has drained.
    assert_eq!(
        rl.check_at("u4", CLASS_DEFAULT, base + Duration::from_secs(65)),
        Verdict::Admitted
    );
}

#[test]
fn prune_is_idempotent() {
    let rl = limiter();
    let base = Instant::now();

    for i in 0..4u64 {
        rl.check_at("u5", CLASS_DEFAULT, base + Duration::from_secs(i * 20));
    }

    let at = base + Duration::from_secs(85);
    let first = rl.prune_at("u5", CLASS_DEFAULT, at);
    let second = rl.prune_at("u5", CLASS_DEFAULT, at);
    assert_eq!(first, second);
    // Attempts sat at 0s/20s/40s/60s; only 40s and 60s are within 60s of 85s.
    assert_eq!(first, 2);
}

#[test]
fn auth_class_is_tighter() {
    let rl = limiter();
    let base = Instant::now();

    for i in 0..3u64 {
        assert_eq!(
            rl.check_at("u6", CLASS_AUTH, base + Duration::from_secs(i)),
            Verdict::Admitted
        );
    }
    assert_eq!(
        rl.check_at("u6", CLASS_AUTH, base + Duration::from_secs(3)),
        Verdict::Denied { retry_after_secs: 300 }
    );
}

#[test]
fn classes_track_independent_windows() {
    let rl = limiter();
    let base = Instant::now();

    for i in 0..5u64 {
        rl.check_at("u7", CLASS_DEFAULT, base + Duration::from_secs(i));
    }
    // default is saturated; admin still admits.
    assert!(matches!(
        rl.check_at("u7", CLASS_DEFAULT, base + Duration::from_secs(5)),
        Verdict::Denied { .. }
    ));
    assert_eq!(
        rl.check_at("u7", "admin", base + Duration::from_secs(5)),
        Verdict::Admitted
    );
}

#[test]
fn unknown_class_uses_default_limits() {
    let rl = limiter();
    let base = Instant::now();

    for i in 0..5u64 {
        assert_eq!(
            rl.check_at("u8", "bogus", base + Duration::from_secs(i)),
            Verdict::Admitted
        );
    }
    assert_eq!(
        rl.check_at("u8", "bogus", base + Duration::from_secs(5)),
        Verdict::Denied { retry_after_secs: 60 }
    );
}

#[test]
fn unblock_lifts_block_and_resets_violations() {
    let rl = limiter();
    let base = Instant::now();

    for i in 0..5u64 {
        rl.check_at("u9", CLASS_DEFAULT, base + Duration::from_secs(i));
    }
    for i in 10..13u64 {
        rl.check_at("u9", CLASS_DEFAULT, base + Duration::from_secs(i));
    }
    assert!(rl.is_blocked("u9"));

    assert!(rl.unblock("u9"));
    assert!(!rl.is_blocked("u9"));
    // Second unblock is a no-op.
    assert!(!rl.unblock("u9"));

    // The window has drained by now, so the caller is admitted again.
    assert_eq!(
        rl.check_at("u9", CLASS_DEFAULT, base + Duration::from_secs(120)),
        Verdict::Admitted
    );

    // Violations were reset: a fresh exceed is a Denied, not an instant block.
    let late = base + Duration::from_secs(200);
    for i in 0..5u64 {
        rl.check_at("u9", CLASS_DEFAULT, late + Duration::from_secs(i));
    }
    assert!(matches!(
        rl.check_at("u9", CLASS_DEFAULT, late + Duration::from_secs(5)),
        Verdict::Denied { .. }
    ));
    assert!(!rl.is_blocked("u9"));
}
