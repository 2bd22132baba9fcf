use std::collections::HashMap;
use utility::model::FunctionRecord;
use utility::Result;

/// decodes the gateway's function listing. An empty body is an empty listing.
pub fn read_functions(body: &[u8]) -> Result<Vec<FunctionRecord>> {
    if body.is_empty() {
        return Ok(vec![]);
    }
    let functions: Option<Vec<FunctionRecord>> = serde_json::from_slice(body)?;
    Ok(functions.unwrap_or_default())
}

/// names of the functions that belong to an owner, in listing order.
/// With a non-empty `owner` only that owner's functions are kept.
pub fn list_function_names<'a>(functions: &'a [FunctionRecord], owner: &str) -> Vec<&'a str> {
    functions
        .iter()
        .filter(|function| match function.owner() {
            // system functions carry no owner
            None => false,
            Some(_) if owner.is_empty() => true,
            Some(function_owner) => function_owner == owner,
        })
        .map(|function| function.name.as_str())
        .collect()
}

/// number of functions per owner, system functions are left out
pub fn count_by_owner(functions: &[FunctionRecord]) -> HashMap<&str, usize> {
    let mut owners = HashMap::new();
    for owner in functions.iter().filter_map(FunctionRecord::owner) {
        *owners.entry(owner).or_insert(0) += 1;
    }
    owners
}
