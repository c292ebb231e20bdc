#[get("/")]
pub fn home() -> &'static str {
    "Servidor CuidArtrite - Lógica de Dia Único Ativa!"
}

#[get("/health_check")]
pub fn health_check() {}
