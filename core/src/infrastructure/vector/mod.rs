pub mod pinecone;

pub use pinecone::PineconeVectorIndex;
