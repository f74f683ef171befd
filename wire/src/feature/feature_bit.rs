/// Feature names from BOLT 9. Each one has an even (required) and an odd
/// (optional) bit, except initial routing sync which is odd only.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub enum Feature {
    DataLossProtect,
    InitialRoutingSync,
    UpfrontShutdownScript,
    GossipQueries,
    VarOnionOptin,
    GossipQueriesEx,
    StaticRemoteKey,
    PaymentSecret,
    BasicMpp,
    LargeChannels,
    AnchorOutputs,
    ChannelType,
}

impl Feature {
    pub const ALL: [Feature; 12] = [
        Feature::DataLossProtect,
        Feature::InitialRoutingSync,
        Feature::UpfrontShutdownScript,
        Feature::GossipQueries,
        Feature::VarOnionOptin,
        Feature::GossipQueriesEx,
        Feature::StaticRemoteKey,
        Feature::PaymentSecret,
        Feature::BasicMpp,
        Feature::LargeChannels,
        Feature::AnchorOutputs,
        Feature::ChannelType,
    ];

    /// The odd bit of the pair.
    pub fn optional_bit(self) -> u16 {
        use self::Feature::*;
        match self {
            DataLossProtect => 1,
            InitialRoutingSync => 3,
            UpfrontShutdownScript => 5,
            GossipQueries => 7,
            VarOnionOptin => 9,
            GossipQueriesEx => 11,
            StaticRemoteKey => 13,
            PaymentSecret => 15,
            BasicMpp => 17,
            LargeChannels => 19,
            AnchorOutputs => 21,
            ChannelType => 45,
        }
    }

    pub fn required_bit(self) -> Option<u16> {
        match self {
            Feature::InitialRoutingSync => None,
            other => Some(other.optional_bit() - 1),
        }
    }

    /// Features that must be advertised together with this one.
    pub fn dependencies(self) -> &'static [Feature] {
        use self::Feature::*;
        match self {
            GossipQueriesEx => &[GossipQueries],
            PaymentSecret => &[VarOnionOptin],
            BasicMpp => &[PaymentSecret],
            AnchorOutputs => &[StaticRemoteKey],
            _ => &[],
        }
    }

    pub fn from_bit(bit: u16) -> Option<Self> {
        Feature::ALL
            .iter()
            .cloned()
            .find(|f| f.optional_bit() == bit || f.required_bit() == Some(bit))
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub enum FeatureBit {
    DataLossProtectRequired,
    DataLossProtectOptional,
    InitialRoutingSync,
    UpfrontShutdownScriptRequired,
    UpfrontShutdownScriptOptional,
    GossipQueriesRequired,
    GossipQueriesOptional,
    VarOnionOptinRequired,
    VarOnionOptinOptional,
    GossipQueriesExRequired,
    GossipQueriesExOptional,
    StaticRemoteKeyRequired,
    StaticRemoteKeyOptional,
    PaymentSecretRequired,
    PaymentSecretOptional,
    BasicMppRequired,
    BasicMppOptional,
    LargeChannelsRequired,
    LargeChannelsOptional,
    AnchorOutputsRequired,
    AnchorOutputsOptional,
    ChannelTypeRequired,
    ChannelTypeOptional,
    Custom(u16),
}

impl From<u16> for FeatureBit {
    fn from(raw: u16) -> Self {
        use self::FeatureBit::*;
        match raw {
            0 => DataLossProtectRequired,
            1 => DataLossProtectOptional,
            3 => InitialRoutingSync,
            4 => UpfrontShutdownScriptRequired,
            5 => UpfrontShutdownScriptOptional,
            6 => GossipQueriesRequired,
            7 => GossipQueriesOptional,
            8 => VarOnionOptinRequired,
            9 => VarOnionOptinOptional,
            10 => GossipQueriesExRequired,
            11 => GossipQueriesExOptional,
            12 => StaticRemoteKeyRequired,
            13 => StaticRemoteKeyOptional,
            14 => PaymentSecretRequired,
            15 => PaymentSecretOptional,
            16 => BasicMppRequired,
            17 => BasicMppOptional,
            18 => LargeChannelsRequired,
            19 => LargeChannelsOptional,
            20 => AnchorOutputsRequired,
            21 => AnchorOutputsOptional,
            44 => ChannelTypeRequired,
            45 => ChannelTypeOptional,
            c => Custom(c),
        }
    }
}

impl From<FeatureBit> for u16 {
    fn from(feature_bit: FeatureBit) -> Self {
        use self::FeatureBit::*;
        match feature_bit {
            DataLossProtectRequired => 0,
            DataLossProtectOptional => 1,
            InitialRoutingSync => 3,
            UpfrontShutdownScriptRequired => 4,
            UpfrontShutdownScriptOptional => 5,
            GossipQueriesRequired => 6,
            GossipQueriesOptional => 7,
            VarOnionOptinRequired => 8,
            VarOnionOptinOptional => 9,
            GossipQueriesExRequired => 10,
            GossipQueriesExOptional => 11,
            StaticRemoteKeyRequired => 12,
            StaticRemoteKeyOptional => 13,
            PaymentSecretRequired => 14,
            PaymentSecretOptional => 15,
            BasicMppRequired => 16,
            BasicMppOptional => 17,
            LargeChannelsRequired => 18,
            LargeChannelsOptional => 19,
            AnchorOutputsRequired => 20,
            AnchorOutputsOptional => 21,
            ChannelTypeRequired => 44,
            ChannelTypeOptional => 45,
            Custom(c) => c,
        }
    }
}

impl FeatureBit {
    /// A `Custom` holding a number that has a name is not valid.
    pub fn is_valid(&self) -> bool {
        FeatureBit::from(u16::from(*self)) == *self
    }

    pub fn is_required(&self) -> bool {
        u16::from(*self) % 2 == 0
    }

    pub fn is_known(&self) -> bool {
        match self {
            FeatureBit::Custom(_) => false,
            _ => true,
        }
    }

    pub fn feature(&self) -> Option<Feature> {
        Feature::from_bit(u16::from(*self))
    }
}
