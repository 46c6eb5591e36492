// blast_cli/src/rollout/rewards.rs
#![forbid(unsafe_code)]

use block_blast_engine::{RewardCollector, RewardEvent, Wallet};

/// Rollout-side reward collector: credits a [`Wallet`] and optionally echoes each event as a
/// JSON line (the same payload the wallet service receives).
#[derive(Debug, Default)]
pub struct RewardLog {
    pub wallet: Wallet,
    print: bool,
}

impl RewardLog {
    pub fn new(print: bool) -> Self {
        Self {
            wallet: Wallet::default(),
            print,
        }
    }
}

impl RewardCollector for RewardLog {
    fn collect(&mut self, event: RewardEvent) {
        self.wallet.collect(event);
        if self.print {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("reward event not serializable: {e}"),
            }
        }
    }
}
