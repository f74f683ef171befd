use super::Hash256;
use super::ChannelId;
use super::MilliSatoshi;
use super::Satoshi;
use super::SatoshiPerKiloWeight;
use super::CsvDelay;
use super::ChannelFlags;
use super::ChannelKeys;
use super::RawFeatureVector;
use super::decode_extension;

use binformat::{Decode, Encode, Reader, TlvStream, WireError, Writer};

pub const UPFRONT_SHUTDOWN_SCRIPT_TLV: u64 = 0;
pub const CHANNEL_TYPE_TLV: u64 = 1;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct OpenChannel {
    pub chain_hash: Hash256,
    pub temporary_channel_id: ChannelId,
    pub funding: Satoshi,
    pub push: MilliSatoshi,
    pub dust_limit: Satoshi,
    pub max_in_flight: MilliSatoshi,
    pub channel_reserve: Satoshi,
    pub htlc_minimum: MilliSatoshi,
    pub feerate: SatoshiPerKiloWeight,
    pub csv_delay: CsvDelay,
    pub max_accepted_htlc_number: u16,
    pub keys: ChannelKeys,
    pub flags: ChannelFlags,
    pub upfront_shutdown_script: Option<Vec<u8>>,
    pub channel_type: Option<RawFeatureVector>,
    /// Unknown odd records, re-encoded as received.
    pub extra: TlvStream,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AcceptChannel {
    pub temporary_channel_id: ChannelId,
    pub dust_limit: Satoshi,
    pub max_in_flight: MilliSatoshi,
    pub channel_reserve: Satoshi,
    pub htlc_minimum: MilliSatoshi,
    pub minimum_depth: u32,
    pub csv_delay: CsvDelay,
    pub max_accepted_htlc_number: u16,
    pub keys: ChannelKeys,
    pub upfront_shutdown_script: Option<Vec<u8>>,
    pub channel_type: Option<RawFeatureVector>,
    pub extra: TlvStream,
}

fn extension(
    extra: &TlvStream,
    upfront_shutdown_script: &Option<Vec<u8>>,
    channel_type: &Option<RawFeatureVector>,
) -> TlvStream {
    let mut stream = extra.clone();
    if let Some(script) = upfront_shutdown_script {
        stream.insert(UPFRONT_SHUTDOWN_SCRIPT_TLV, script.clone());
    }
    if let Some(channel_type) = channel_type {
        stream.insert(CHANNEL_TYPE_TLV, channel_type.to_bytes());
    }
    stream
}

type Extension = (Option<Vec<u8>>, Option<RawFeatureVector>, TlvStream);

fn split_extension(r: &mut Reader<'_>) -> Result<Extension, WireError> {
    let mut stream = decode_extension(r, &[UPFRONT_SHUTDOWN_SCRIPT_TLV, CHANNEL_TYPE_TLV])?;
    let upfront_shutdown_script = stream.remove(UPFRONT_SHUTDOWN_SCRIPT_TLV);
    let channel_type = match stream.remove(CHANNEL_TYPE_TLV) {
        Some(bytes) => Some(RawFeatureVector::from_bytes(&bytes)?),
        None => None,
    };
    Ok((upfront_shutdown_script, channel_type, stream))
}

impl Encode for OpenChannel {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.chain_hash.encode(w)?;
        self.temporary_channel_id.encode(w)?;
        self.funding.encode(w)?;
        self.push.encode(w)?;
        self.dust_limit.encode(w)?;
        self.max_in_flight.encode(w)?;
        self.channel_reserve.encode(w)?;
        self.htlc_minimum.encode(w)?;
        self.feerate.encode(w)?;
        self.csv_delay.encode(w)?;
        self.max_accepted_htlc_number.encode(w)?;
        self.keys.encode(w)?;
        self.flags.encode(w)?;
        extension(&self.extra, &self.upfront_shutdown_script, &self.channel_type).encode(w)
    }
}

impl Decode for OpenChannel {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            let chain_hash = Hash256::decode(r)?;
            let temporary_channel_id = ChannelId::decode(r)?;
            let funding = Satoshi::decode(r)?;
            let push = MilliSatoshi::decode(r)?;
            let dust_limit = Satoshi::decode(r)?;
            let max_in_flight = MilliSatoshi::decode(r)?;
            let channel_reserve = Satoshi::decode(r)?;
            let htlc_minimum = MilliSatoshi::decode(r)?;
            let feerate = SatoshiPerKiloWeight::decode(r)?;
            let csv_delay = CsvDelay::decode(r)?;
            let max_accepted_htlc_number = u16::decode(r)?;
            let keys = ChannelKeys::decode(r)?;
            let flags = ChannelFlags::decode(r)?;
            let (upfront_shutdown_script, channel_type, extra) = split_extension(r)?;
            Ok(OpenChannel {
                chain_hash,
                temporary_channel_id,
                funding,
                push,
                dust_limit,
                max_in_flight,
                channel_reserve,
                htlc_minimum,
                feerate,
                csv_delay,
                max_accepted_htlc_number,
                keys,
                flags,
                upfront_shutdown_script,
                channel_type,
                extra,
            })
        })
    }
}

impl Encode for AcceptChannel {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.temporary_channel_id.encode(w)?;
        self.dust_limit.encode(w)?;
        self.max_in_flight.encode(w)?;
        self.channel_reserve.encode(w)?;
        self.htlc_minimum.encode(w)?;
        self.minimum_depth.encode(w)?;
        self.csv_delay.encode(w)?;
        self.max_accepted_htlc_number.encode(w)?;
        self.keys.encode(w)?;
        extension(&self.extra, &self.upfront_shutdown_script, &self.channel_type).encode(w)
    }
}

impl Decode for AcceptChannel {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            let temporary_channel_id = ChannelId::decode(r)?;
            let dust_limit = Satoshi::decode(r)?;
            let max_in_flight = MilliSatoshi::decode(r)?;
            let channel_reserve = Satoshi::decode(r)?;
            let htlc_minimum = MilliSatoshi::decode(r)?;
            let minimum_depth = u32::decode(r)?;
            let csv_delay = CsvDelay::decode(r)?;
            let max_accepted_htlc_number = u16::decode(r)?;
            let keys = ChannelKeys::decode(r)?;
            let (upfront_shutdown_script, channel_type, extra) = split_extension(r)?;
            Ok(AcceptChannel {
                temporary_channel_id,
                dust_limit,
                max_in_flight,
                channel_reserve,
                htlc_minimum,
                minimum_depth,
                csv_delay,
                max_accepted_htlc_number,
                keys,
                upfront_shutdown_script,
                channel_type,
                extra,
            })
        })
    }
}
