pub mod contests;
pub mod fallback;
pub mod local;
pub mod monitor;
pub mod participants;
pub mod prizes;

pub use contests::{ContestPatch, LocalContests, NewContest, RemoteContests};
pub use fallback::{CollectionStore, FallbackStore, StoreSource};
pub use local::LocalCollection;
pub use monitor::StorageMonitor;
pub use participants::{LocalParticipants, NewParticipant, ParticipantPatch, RemoteParticipants};
pub use prizes::{LocalPrizes, NewPrize, PrizePatch, RemotePrizes};

pub type ContestStore = FallbackStore<RemoteContests, LocalContests>;
pub type PrizeStore = FallbackStore<RemotePrizes, LocalPrizes>;
pub type ParticipantStore = FallbackStore<RemoteParticipants, LocalParticipants>;
