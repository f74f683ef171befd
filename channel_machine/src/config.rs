use wire::{CsvDelay, Hash256, MilliSatoshi, Satoshi, SatoshiPerKiloWeight};

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("cannot parse {key}: {value:?}")]
    Parse { key: &'static str, value: String },
}

/// Terms this node offers or accepts while a channel is being established.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstablishmentConfig {
    pub chain_hash: Hash256,
    pub dust_limit: Satoshi,
    /// Part of the funding amount the peer must keep in its balance.
    pub channel_reserve_ratio: f64,
    pub htlc_minimum: MilliSatoshi,
    pub max_htlc_value_in_flight: MilliSatoshi,
    pub max_accepted_htlcs: u16,
    /// Delay we require on the to_local output of the peer.
    pub to_self_delay: CsvDelay,
    /// Longest delay the peer may impose on our own outputs.
    pub max_to_self_delay: CsvDelay,
    pub minimum_depth: u32,
    pub max_minimum_depth: u32,
    pub min_funding: Satoshi,
    pub min_feerate: SatoshiPerKiloWeight,
    pub max_feerate: SatoshiPerKiloWeight,
    pub max_temporary_id_attempts: u32,
}

impl Default for EstablishmentConfig {
    fn default() -> Self {
        EstablishmentConfig {
            chain_hash: Hash256::BITCOIN_CHAIN_HASH,
            dust_limit: Satoshi::from(546),
            channel_reserve_ratio: 0.01,
            htlc_minimum: MilliSatoshi::from(1),
            max_htlc_value_in_flight: MilliSatoshi::from(5_000_000_000),
            max_accepted_htlcs: 483,
            to_self_delay: CsvDelay::from(144),
            max_to_self_delay: CsvDelay::from(2016),
            minimum_depth: 3,
            max_minimum_depth: 6,
            min_funding: Satoshi::from(20_000),
            min_feerate: SatoshiPerKiloWeight::from(253),
            max_feerate: SatoshiPerKiloWeight::from(100_000),
            max_temporary_id_attempts: 8,
        }
    }
}

#[derive(Clone, Copy)]
enum CommandLineKey {
    ChainHash,
    DustLimit,
    ChannelReserveRatio,
    HtlcMinimum,
    MaxHtlcValueInFlight,
    MaxAcceptedHtlcs,
    ToSelfDelay,
    MaxToSelfDelay,
    MinimumDepth,
    MaxMinimumDepth,
    MinFunding,
    MinFeerate,
    MaxFeerate,
    MaxTemporaryIdAttempts,
}

impl CommandLineKey {
    const ALL: [CommandLineKey; 14] = [
        CommandLineKey::ChainHash,
        CommandLineKey::DustLimit,
        CommandLineKey::ChannelReserveRatio,
        CommandLineKey::HtlcMinimum,
        CommandLineKey::MaxHtlcValueInFlight,
        CommandLineKey::MaxAcceptedHtlcs,
        CommandLineKey::ToSelfDelay,
        CommandLineKey::MaxToSelfDelay,
        CommandLineKey::MinimumDepth,
        CommandLineKey::MaxMinimumDepth,
        CommandLineKey::MinFunding,
        CommandLineKey::MinFeerate,
        CommandLineKey::MaxFeerate,
        CommandLineKey::MaxTemporaryIdAttempts,
    ];

    fn pattern(&self) -> &'static str {
        use self::CommandLineKey::*;

        match self {
            ChainHash => "--chain-hash=",
            DustLimit => "--dust-limit=",
            ChannelReserveRatio => "--channel-reserve-ratio=",
            HtlcMinimum => "--htlc-minimum=",
            MaxHtlcValueInFlight => "--max-htlc-value-in-flight=",
            MaxAcceptedHtlcs => "--max-accepted-htlcs=",
            ToSelfDelay => "--to-self-delay=",
            MaxToSelfDelay => "--max-to-self-delay=",
            MinimumDepth => "--minimum-depth=",
            MaxMinimumDepth => "--max-minimum-depth=",
            MinFunding => "--min-funding=",
            MinFeerate => "--min-feerate=",
            MaxFeerate => "--max-feerate=",
            MaxTemporaryIdAttempts => "--max-temporary-id-attempts=",
        }
    }

    fn predicate(&self, arg: &str) -> bool {
        arg.starts_with(self.pattern())
    }

    fn value<'a>(&self, arg: &'a str) -> &'a str {
        &arg[self.pattern().len()..]
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, ConfigError> {
        value.parse().map_err(|_| ConfigError::Parse {
            key: self.pattern().trim_start_matches("--").trim_end_matches('='),
            value: value.to_owned(),
        })
    }

    fn apply(&self, config: &mut EstablishmentConfig, value: &str) -> Result<(), ConfigError> {
        use self::CommandLineKey::*;

        match self {
            ChainHash => {
                config.chain_hash = Hash256::from_hex(value).map_err(|_| ConfigError::Parse {
                    key: "chain-hash",
                    value: value.to_owned(),
                })?
            },
            DustLimit => config.dust_limit = Satoshi::from(self.parse::<u64>(value)?),
            ChannelReserveRatio => config.channel_reserve_ratio = self.parse(value)?,
            HtlcMinimum => config.htlc_minimum = MilliSatoshi::from(self.parse::<u64>(value)?),
            MaxHtlcValueInFlight => config.max_htlc_value_in_flight = MilliSatoshi::from(self.parse::<u64>(value)?),
            MaxAcceptedHtlcs => config.max_accepted_htlcs = self.parse(value)?,
            ToSelfDelay => config.to_self_delay = CsvDelay::from(self.parse::<u16>(value)?),
            MaxToSelfDelay => config.max_to_self_delay = CsvDelay::from(self.parse::<u16>(value)?),
            MinimumDepth => config.minimum_depth = self.parse(value)?,
            MaxMinimumDepth => config.max_minimum_depth = self.parse(value)?,
            MinFunding => config.min_funding = Satoshi::from(self.parse::<u64>(value)?),
            MinFeerate => config.min_feerate = SatoshiPerKiloWeight::from(self.parse::<u32>(value)?),
            MaxFeerate => config.max_feerate = SatoshiPerKiloWeight::from(self.parse::<u32>(value)?),
            MaxTemporaryIdAttempts => config.max_temporary_id_attempts = self.parse(value)?,
        }
        Ok(())
    }
}

impl EstablishmentConfig {
    /// Defaults overridden by `--key=value` arguments, the last occurrence
    /// of a key wins and unrelated arguments are skipped.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let args = args.into_iter().collect::<Vec<_>>();
        let mut config = EstablishmentConfig::default();
        for key in CommandLineKey::ALL.iter() {
            if let Some(arg) = args.iter().rev().find(|arg| key.predicate(arg)) {
                key.apply(&mut config, key.value(arg))?;
            }
        }
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_args(env::args())
    }

    /// The reserve we require from the peer, never below our dust limit.
    pub fn channel_reserve(&self, funding: Satoshi) -> Satoshi {
        let reserve = (u64::from(funding) as f64 * self.channel_reserve_ratio).round() as u64;
        Satoshi::from(reserve.max(u64::from(self.dust_limit)))
    }
}
