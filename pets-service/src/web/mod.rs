//! HTTP adapter: decoders, encoders, wire model and the handler pipeline

pub mod decoder;
pub mod encoder;
pub mod model;
pub mod transport;

pub use decoder::{
    CreatePetDecoder, DecodeError, Decoder, DeletePetDecoder, GetPetWithIdDecoder, PetDecoders,
    SearchPetsDecoder, UpdatePetDecoder,
};
pub use encoder::{
    CreatePetEncoder, DeletePetEncoder, EncodeError, Encoder, GetPetWithIdEncoder, PetEncoders,
    SearchPetsEncoder, UpdatePetEncoder,
};
pub use model::ResponseEnvelope;
pub use transport::{ErrorResponse, Handler, Missing};
