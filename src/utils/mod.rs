pub mod secret_key_cache;
