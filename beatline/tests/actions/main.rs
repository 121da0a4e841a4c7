mod fixtures;
mod test_chain_settings;
mod test_field_accessor;
mod test_tablespace_events;
