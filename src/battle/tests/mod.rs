mod common;


#[cfg(test)]
mod test_critical_hits;
